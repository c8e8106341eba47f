//! Guard outcomes.
//!
//! Every guard resolves to a [`Disposition`] telling the router what to
//! do with the in-flight transition. The first non-continue disposition
//! short-circuits the chain.

use crate::page::Page;
use folio_types::Location;
use serde::{Deserialize, Serialize};

/// Callback handed to the router by an entering guard.
///
/// Invoked exactly once with the newly constructed page instance after
/// the swap completes. This is the only way a guard can touch the
/// target page, because entering guards run before it exists.
pub type MountCallback = Box<dyn FnOnce(&mut dyn Page) + Send>;

/// Phase of the guard chain a guard is bound to.
///
/// Chain order is fixed: `Leaving` guards of the active page, then
/// `Global` guards, then the `Permission` gate of the target route,
/// then `Entering` guards of the target route. `Update` replaces the
/// leaving/entering pair when the active route is reused with new
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardPhase {
    /// Runs against the page being left.
    Leaving,
    /// Installed once at startup, runs on every transition.
    Global,
    /// The entitlement check for the target section.
    Permission,
    /// Runs against the prospective target route (page not built yet).
    Entering,
    /// Runs when the active route is reused with different parameters.
    Update,
}

impl std::fmt::Display for GuardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Leaving => "leaving",
            Self::Global => "global",
            Self::Permission => "permission",
            Self::Entering => "entering",
            Self::Update => "update",
        };
        write!(f, "{}", name)
    }
}

/// What a guard decided about the transition.
pub enum Disposition {
    /// Let the chain continue.
    Continue,
    /// Continue, and call back once the target page is mounted.
    ///
    /// Only meaningful from `Entering` guards; the router rejects it
    /// elsewhere by treating it as a plain continue and dropping the
    /// callback with a warning.
    ContinueWith(MountCallback),
    /// Stop the transition; the active page stays.
    Cancel,
    /// Abandon this attempt and retry at another location.
    Redirect(Location),
    /// The guard hit an unexpected error; the transition fails.
    Fail {
        /// What went wrong, for the error observer.
        reason: String,
    },
}

impl Disposition {
    /// Creates a failure disposition.
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Fail {
            reason: reason.into(),
        }
    }

    /// Creates a continue-with-callback disposition.
    #[must_use]
    pub fn continue_with<F>(callback: F) -> Self
    where
        F: FnOnce(&mut dyn Page) + Send + 'static,
    {
        Self::ContinueWith(Box::new(callback))
    }

    /// Returns `true` for [`Continue`](Self::Continue) and
    /// [`ContinueWith`](Self::ContinueWith).
    #[must_use]
    pub fn allows_continue(&self) -> bool {
        matches!(self, Self::Continue | Self::ContinueWith(_))
    }
}

impl std::fmt::Debug for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::ContinueWith(_) => write!(f, "ContinueWith(..)"),
            Self::Cancel => write!(f, "Cancel"),
            Self::Redirect(loc) => write!(f, "Redirect({})", loc),
            Self::Fail { reason } => write!(f, "Fail {{ reason: {:?} }}", reason),
        }
    }
}
