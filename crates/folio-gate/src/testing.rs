//! Test doubles for the gate's collaborators.
//!
//! Lets router and application tests script entitlements and dialog
//! choices without real services.

use crate::{DialogDescriptor, DialogOutcome, DialogService, Entitlements, EntitlementProvider};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Provider serving a scripted entitlement snapshot.
///
/// The snapshot can be replaced mid-test to model a plan change.
pub struct StaticEntitlements {
    current: Mutex<Entitlements>,
}

impl StaticEntitlements {
    /// Creates a provider serving `entitlements`.
    #[must_use]
    pub fn new(entitlements: Entitlements) -> Self {
        Self {
            current: Mutex::new(entitlements),
        }
    }

    /// Replaces the served snapshot.
    pub fn replace(&self, entitlements: Entitlements) {
        *self.current.lock() = entitlements;
    }
}

impl EntitlementProvider for StaticEntitlements {
    fn current_entitlements(&self) -> Entitlements {
        self.current.lock().clone()
    }
}

/// Dialog service resolving every dialog with a scripted outcome.
///
/// Records how many dialogs were shown and the last descriptor, so
/// tests can assert "exactly one dialog" properties.
pub struct BlockingDialogStub {
    outcome: Mutex<DialogOutcome>,
    shown: AtomicUsize,
    last: Mutex<Option<DialogDescriptor>>,
}

impl BlockingDialogStub {
    /// Creates a stub resolving every dialog with `outcome`.
    #[must_use]
    pub fn resolving(outcome: DialogOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            shown: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Changes the scripted outcome for subsequent dialogs.
    pub fn resolve_with(&self, outcome: DialogOutcome) {
        *self.outcome.lock() = outcome;
    }

    /// Returns how many dialogs have been shown.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    /// Returns the most recent descriptor, if any dialog was shown.
    #[must_use]
    pub fn last_descriptor(&self) -> Option<DialogDescriptor> {
        self.last.lock().clone()
    }
}

#[async_trait::async_trait]
impl DialogService for BlockingDialogStub {
    async fn show(&self, descriptor: DialogDescriptor) -> DialogOutcome {
        self.shown.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(descriptor);
        *self.outcome.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{ForbiddenCode, Permission};

    #[test]
    fn static_entitlements_replace() {
        let provider = StaticEntitlements::new(Entitlements::none());
        assert!(provider.current_entitlements().is_empty());

        provider.replace(Entitlements::of([Permission::ForeignShares]));
        assert!(provider.current_entitlements().has(Permission::ForeignShares));
    }

    #[tokio::test]
    async fn dialog_stub_records_descriptors() {
        let stub = BlockingDialogStub::resolving(DialogOutcome::Confirmed);
        assert!(stub.last_descriptor().is_none());

        let outcome = stub
            .show(DialogDescriptor::restriction(
                ForbiddenCode::LimitExceeded,
                Permission::Notifications,
            ))
            .await;

        assert_eq!(outcome, DialogOutcome::Confirmed);
        assert_eq!(stub.shown(), 1);
        assert!(matches!(
            stub.last_descriptor(),
            Some(DialogDescriptor::Restriction { .. })
        ));
    }
}
