//! Identifier types for the folio client shell.
//!
//! All identifiers are UUID-based so they stay unique across page
//! remounts and can be logged and correlated without extra context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one live page component instance.
///
/// A page instance is the unit of subscription ownership: every event-bus
/// subscription a page registers carries its [`PageInstanceId`], and all of
/// them are removed together when the instance is destroyed. A new visit to
/// the same route produces a new instance with a new id, so a stale handler
/// can never be attributed to the fresh instance.
///
/// # Example
///
/// ```
/// use folio_types::PageInstanceId;
///
/// let first_visit = PageInstanceId::new();
/// let second_visit = PageInstanceId::new();
///
/// assert_ne!(first_visit, second_visit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageInstanceId(pub Uuid);

impl PageInstanceId {
    /// Creates a new [`PageInstanceId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PageInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page:{}", self.0)
    }
}

/// Identifier for one in-flight navigation attempt.
///
/// Each call to the router's `navigate` mints a fresh [`TransitionId`].
/// A redirect starts a *new* attempt with a new id; the superseded
/// attempt keeps its own id in logs, which is what makes redirect chains
/// diagnosable.
///
/// # Example
///
/// ```
/// use folio_types::TransitionId;
///
/// let attempt = TransitionId::new();
/// let retry = TransitionId::new();
///
/// assert_ne!(attempt, retry);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub Uuid);

impl TransitionId {
    /// Creates a new [`TransitionId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transition:{}", self.0)
    }
}

/// Identifier for one event-bus subscription.
///
/// Returned by `EventBus::subscribe` and used for exact-pair removal.
/// Subscription identity is explicit rather than derived from handler
/// closure equality, which Rust cannot observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    /// Creates a new [`SubscriptionId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_instance_ids_are_unique() {
        let a = PageInstanceId::new();
        let b = PageInstanceId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn transition_ids_are_unique() {
        let a = TransitionId::new();
        let b = TransitionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn subscription_ids_are_unique() {
        let a = SubscriptionId::new();
        let b = SubscriptionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_prefixes() {
        assert!(PageInstanceId::new().to_string().starts_with("page:"));
        assert!(TransitionId::new().to_string().starts_with("transition:"));
        assert!(SubscriptionId::new().to_string().starts_with("sub:"));
    }

    #[test]
    fn ids_roundtrip_serde() {
        let id = PageInstanceId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: PageInstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
