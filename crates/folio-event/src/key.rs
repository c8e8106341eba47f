//! Event keys for cross-component notifications.
//!
//! Pages publish and subscribe by key; the bus guarantees ordering only
//! within one key's subscriber list, never across keys.
//!
//! # Built-in Keys
//!
//! | Key | Published when | Typical subscribers |
//! |-----|----------------|---------------------|
//! | `AssetCreated` | user registers a custom asset | quotes, portfolio |
//! | `AssetUpdated` | a custom asset is edited | quotes |
//! | `TradeCreated` | a trade is saved | portfolio, quotes, trades |
//! | `TradeUpdated` | a trade is edited | portfolio, trades |
//! | `PortfolioSwitched` | the active portfolio changes | all data pages |
//!
//! For ad-hoc events between sibling components, use [`EventKey::custom`].

use serde::{Deserialize, Serialize};

/// Key identifying one class of cross-component event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKey {
    /// A custom asset was created.
    AssetCreated,
    /// A custom asset was edited.
    AssetUpdated,
    /// A trade was saved.
    TradeCreated,
    /// A trade was edited.
    TradeUpdated,
    /// The active portfolio changed.
    PortfolioSwitched,
    /// Application-defined event outside the built-in set.
    Custom(String),
}

impl EventKey {
    /// Creates a custom key.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_event::EventKey;
    ///
    /// let key = EventKey::custom("SIDEBAR_TOGGLED");
    /// assert_eq!(key.name(), "SIDEBAR_TOGGLED");
    /// ```
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Returns the display name of this key.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::AssetCreated => "ASSET_CREATED".to_string(),
            Self::AssetUpdated => "ASSET_UPDATED".to_string(),
            Self::TradeCreated => "TRADE_CREATED".to_string(),
            Self::TradeUpdated => "TRADE_UPDATED".to_string(),
            Self::PortfolioSwitched => "PORTFOLIO_SWITCHED".to_string(),
            Self::Custom(name) => name.clone(),
        }
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names() {
        assert_eq!(EventKey::AssetCreated.name(), "ASSET_CREATED");
        assert_eq!(EventKey::TradeCreated.name(), "TRADE_CREATED");
        assert_eq!(EventKey::PortfolioSwitched.to_string(), "PORTFOLIO_SWITCHED");
    }

    #[test]
    fn custom_key() {
        let key = EventKey::custom("SIDEBAR_TOGGLED");
        assert_eq!(key, EventKey::Custom("SIDEBAR_TOGGLED".into()));
        assert_ne!(key, EventKey::custom("OTHER"));
    }

    #[test]
    fn keys_are_hashable() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(EventKey::TradeCreated, 1);
        map.insert(EventKey::TradeCreated, 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&EventKey::TradeCreated], 2);
    }

    #[test]
    fn key_roundtrip_serde() {
        let key = EventKey::custom("X");
        let json = serde_json::to_string(&key).unwrap();
        let back: EventKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }
}
