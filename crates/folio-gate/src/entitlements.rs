//! Entitlement snapshots and their provider contract.
//!
//! The gate never owns entitlement state; it asks an external provider
//! for a fresh snapshot on every check, because the user's plan can
//! change between navigations (upgrade, expiry) without the shell
//! restarting.

use folio_types::Permission;
use std::collections::HashSet;

/// Call-by-value snapshot of the permissions in the user's current plan.
///
/// # Example
///
/// ```
/// use folio_gate::Entitlements;
/// use folio_types::Permission;
///
/// let plan = Entitlements::of([Permission::CombinedPortfolio]);
///
/// assert!(plan.has(Permission::CombinedPortfolio));
/// assert!(!plan.has(Permission::Notifications));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entitlements {
    granted: HashSet<Permission>,
}

impl Entitlements {
    /// Creates an empty snapshot (free plan).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a snapshot from the given permissions.
    #[must_use]
    pub fn of(granted: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            granted: granted.into_iter().collect(),
        }
    }

    /// Returns `true` if the snapshot contains `permission`.
    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    /// Returns the number of granted permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Returns `true` if no permission is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

/// Source of the current user's entitlement snapshot.
///
/// Implemented by the client-info service in the application layer.
/// Each call must reflect the plan *now*; implementations must not
/// serve a snapshot cached across transitions.
pub trait EntitlementProvider: Send + Sync {
    /// Returns a fresh entitlement snapshot.
    fn current_entitlements(&self) -> Entitlements;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_nothing() {
        let plan = Entitlements::none();
        assert!(plan.is_empty());
        assert!(!plan.has(Permission::CombinedPortfolio));
    }

    #[test]
    fn snapshot_membership() {
        let plan = Entitlements::of([Permission::CombinedPortfolio, Permission::ForeignShares]);
        assert_eq!(plan.len(), 2);
        assert!(plan.has(Permission::ForeignShares));
        assert!(!plan.has(Permission::Notifications));
    }

    #[test]
    fn duplicate_grants_collapse() {
        let plan = Entitlements::of([Permission::Notifications, Permission::Notifications]);
        assert_eq!(plan.len(), 1);
    }
}
