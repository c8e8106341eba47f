//! Plan permissions and restriction reason codes.
//!
//! A [`Permission`] is an entitlement attached to the user's current plan.
//! Routes that expose paid sections declare the permission they require;
//! the permission gate compares it against the entitlement snapshot at
//! transition time. Entitlements are never cached between transitions
//! because the plan can change while the app is open.

use serde::{Deserialize, Serialize};

/// Entitlement required to enter a restricted section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Aggregated view over several portfolios.
    CombinedPortfolio,
    /// Holding foreign-listed instruments.
    ForeignShares,
    /// Price and dividend notifications.
    Notifications,
}

impl Permission {
    /// Returns the stable wire name of this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CombinedPortfolio => "COMBINED_PORTFOLIO",
            Self::ForeignShares => "FOREIGN_SHARES",
            Self::Notifications => "NOTIFICATIONS",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why access to a section was refused.
///
/// Carried inside a denied permission decision so the caller can render
/// the right restriction message without re-deriving the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForbiddenCode {
    /// The current plan does not include the required permission.
    PermissionDenied,
    /// The plan subscription has lapsed.
    TariffExpired,
    /// A plan quota (portfolios, positions) is exhausted.
    LimitExceeded,
}

impl ForbiddenCode {
    /// Returns the stable wire name of this code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::TariffExpired => "TARIFF_EXPIRED",
            Self::LimitExceeded => "LIMIT_EXCEEDED",
        }
    }
}

impl std::fmt::Display for ForbiddenCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_wire_names() {
        assert_eq!(Permission::CombinedPortfolio.as_str(), "COMBINED_PORTFOLIO");
        assert_eq!(Permission::ForeignShares.as_str(), "FOREIGN_SHARES");
        assert_eq!(Permission::Notifications.as_str(), "NOTIFICATIONS");
    }

    #[test]
    fn forbidden_code_wire_names() {
        assert_eq!(ForbiddenCode::PermissionDenied.as_str(), "PERMISSION_DENIED");
        assert_eq!(ForbiddenCode::TariffExpired.as_str(), "TARIFF_EXPIRED");
        assert_eq!(ForbiddenCode::LimitExceeded.as_str(), "LIMIT_EXCEEDED");
    }

    #[test]
    fn permission_is_hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Permission::CombinedPortfolio);
        set.insert(Permission::CombinedPortfolio);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&Permission::CombinedPortfolio).unwrap();
        assert!(json.contains("CombinedPortfolio"));

        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Permission::CombinedPortfolio);
    }
}
