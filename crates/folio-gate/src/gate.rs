//! The permission gate.
//!
//! Decides whether the current user may enter a restricted section,
//! surfacing a blocking restriction dialog when they may not.
//!
//! ```text
//! Router                    PermissionGate            Collaborators
//!   │ check_entitlement(P)        │                        │
//!   ├────────────────────────────►│ current_entitlements() │
//!   │                             ├───────────────────────►│ EntitlementProvider
//!   │                             │◄───────────────────────┤ (fresh snapshot)
//!   │                             │                        │
//!   │                             │   has(P)? yes ─► granted
//!   │                             │   has(P)? no:          │
//!   │                             │ show(restriction)      │
//!   │                             ├───────────────────────►│ DialogService
//!   │                             │◄── user choice ────────┤ (suspends here)
//!   │◄── Decision ────────────────┤                        │
//! ```

use crate::{Decision, DialogDescriptor, DialogService, EntitlementProvider};
use folio_types::{ForbiddenCode, Permission};
use std::sync::Arc;
use tracing::{debug, info};

/// Entitlement gate for restricted sections.
///
/// Stateless between calls: every check takes a fresh entitlement
/// snapshot and, when it denies, opens exactly one dialog. A guard must
/// therefore call it at most once per transition; two calls mean two
/// dialogs.
///
/// # Example
///
/// ```
/// use folio_gate::testing::{BlockingDialogStub, StaticEntitlements};
/// use folio_gate::{DialogOutcome, DialogService, Entitlements, PermissionGate};
/// use folio_types::Permission;
/// use std::sync::Arc;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let provider = Arc::new(StaticEntitlements::new(Entitlements::of([
///     Permission::CombinedPortfolio,
/// ])));
/// let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));
/// let gate = PermissionGate::new(provider, dialogs.clone() as Arc<dyn DialogService>);
///
/// let decision = gate.check_entitlement(Permission::CombinedPortfolio).await;
/// assert!(decision.is_granted());
/// assert_eq!(dialogs.shown(), 0);
/// # });
/// ```
pub struct PermissionGate {
    provider: Arc<dyn EntitlementProvider>,
    dialogs: Arc<dyn DialogService>,
}

impl PermissionGate {
    /// Creates a gate over the given collaborators.
    #[must_use]
    pub fn new(provider: Arc<dyn EntitlementProvider>, dialogs: Arc<dyn DialogService>) -> Self {
        Self { provider, dialogs }
    }

    /// Checks whether the current user may enter a section requiring
    /// `permission`.
    ///
    /// If the entitlement is present, returns a granting [`Decision`]
    /// immediately and shows nothing. Otherwise opens the restriction
    /// dialog, suspends until it resolves, and returns a denial whose
    /// reason is [`ForbiddenCode::PermissionDenied`]. The dialog outcome
    /// does not change the decision; an upsell action is the
    /// application's business, not the gate's.
    pub async fn check_entitlement(&self, permission: Permission) -> Decision {
        let entitlements = self.provider.current_entitlements();
        if entitlements.has(permission) {
            debug!(%permission, "entitlement present");
            return Decision::granted();
        }

        let reason = ForbiddenCode::PermissionDenied;
        info!(%permission, %reason, "entitlement missing, showing restriction dialog");
        let outcome = self
            .dialogs
            .show(DialogDescriptor::restriction(reason, permission))
            .await;
        debug!(%permission, ?outcome, "restriction dialog resolved");

        Decision::denied(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BlockingDialogStub, StaticEntitlements};
    use crate::{DialogOutcome, Entitlements};

    fn gate_with(
        entitlements: Entitlements,
        outcome: DialogOutcome,
    ) -> (PermissionGate, Arc<BlockingDialogStub>) {
        let provider = Arc::new(StaticEntitlements::new(entitlements));
        let dialogs = Arc::new(BlockingDialogStub::resolving(outcome));
        let gate = PermissionGate::new(provider, dialogs.clone() as Arc<dyn DialogService>);
        (gate, dialogs)
    }

    #[tokio::test]
    async fn entitled_user_passes_without_dialog() {
        let (gate, dialogs) = gate_with(
            Entitlements::of([Permission::CombinedPortfolio]),
            DialogOutcome::Declined,
        );

        let decision = gate.check_entitlement(Permission::CombinedPortfolio).await;

        assert!(decision.is_granted());
        assert_eq!(dialogs.shown(), 0);
    }

    #[tokio::test]
    async fn missing_entitlement_shows_one_dialog_and_denies() {
        let (gate, dialogs) = gate_with(Entitlements::none(), DialogOutcome::Declined);

        let decision = gate.check_entitlement(Permission::CombinedPortfolio).await;

        assert!(!decision.is_granted());
        assert_eq!(decision.reason, Some(ForbiddenCode::PermissionDenied));
        assert_eq!(dialogs.shown(), 1);
    }

    #[tokio::test]
    async fn upsell_outcome_still_denies() {
        let (gate, dialogs) = gate_with(Entitlements::none(), DialogOutcome::Upsell);

        let decision = gate.check_entitlement(Permission::Notifications).await;

        assert!(!decision.is_granted());
        assert_eq!(dialogs.shown(), 1);
    }

    #[tokio::test]
    async fn each_call_is_self_contained() {
        let (gate, dialogs) = gate_with(Entitlements::none(), DialogOutcome::Declined);

        gate.check_entitlement(Permission::ForeignShares).await;
        gate.check_entitlement(Permission::ForeignShares).await;

        // No caching between calls: two checks, two dialogs.
        assert_eq!(dialogs.shown(), 2);
    }

    #[tokio::test]
    async fn snapshot_is_taken_per_call() {
        let provider = Arc::new(StaticEntitlements::new(Entitlements::none()));
        let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));
        let gate = PermissionGate::new(Arc::clone(&provider) as _, Arc::clone(&dialogs) as _);

        assert!(!gate
            .check_entitlement(Permission::CombinedPortfolio)
            .await
            .is_granted());

        // Plan upgraded mid-session: the next check must see it.
        provider.replace(Entitlements::of([Permission::CombinedPortfolio]));
        assert!(gate
            .check_entitlement(Permission::CombinedPortfolio)
            .await
            .is_granted());
        assert_eq!(dialogs.shown(), 1);
    }
}
