//! Blocking dialog contract.
//!
//! The shell has exactly one modality mechanism: an asynchronous dialog
//! that suspends the *calling guard* until the user chooses. Only the
//! suspended transition waits; unrelated work (event dispatches, other
//! timers) keeps running.
//!
//! Two callers use it:
//!
//! - the permission gate, to explain a plan restriction, and
//! - leaving guards, for confirmation prompts (unsaved changes).

use folio_types::{ForbiddenCode, Permission};
use serde::{Deserialize, Serialize};

/// What the dialog should present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogDescriptor {
    /// A section is blocked by the current plan.
    Restriction {
        /// Why access was refused.
        reason: ForbiddenCode,
        /// The permission the section requires.
        required: Permission,
    },
    /// A yes/no confirmation with a free-form question.
    Confirm {
        /// The question to put to the user.
        message: String,
    },
}

impl DialogDescriptor {
    /// Creates a plan-restriction descriptor.
    #[must_use]
    pub fn restriction(reason: ForbiddenCode, required: Permission) -> Self {
        Self::Restriction { reason, required }
    }

    /// Creates a confirmation descriptor.
    #[must_use]
    pub fn confirm(message: impl Into<String>) -> Self {
        Self::Confirm {
            message: message.into(),
        }
    }
}

/// The user's choice when the dialog resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogOutcome {
    /// Affirmative choice (confirmation accepted).
    Confirmed,
    /// Dismissal or negative choice.
    Declined,
    /// The user took the plan-upgrade action from a restriction dialog.
    Upsell,
}

impl DialogOutcome {
    /// Returns `true` for [`Confirmed`](Self::Confirmed).
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Modal dialog service.
///
/// `show` resolves only when the user acts; there is no timeout, so an
/// un-dismissed dialog stalls exactly the transition that opened it.
#[async_trait::async_trait]
pub trait DialogService: Send + Sync {
    /// Presents the dialog and suspends until the user chooses.
    async fn show(&self, descriptor: DialogDescriptor) -> DialogOutcome;
}
