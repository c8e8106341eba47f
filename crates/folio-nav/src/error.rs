//! Router errors.
//!
//! Guard-local errors never escape the router as panics or stray
//! `Err`s: the router converts them into a `Failed` transition carrying
//! a [`NavError`] and notifies the registered [`ErrorObserver`]. The
//! user stays on the current page in every failure case.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`NavError::GuardFailed`] | `NAV_GUARD_FAILED` | Yes |
//! | [`NavError::RedirectLoopExceeded`] | `NAV_REDIRECT_LOOP` | No |
//! | [`NavError::RouteNotFound`] | `NAV_ROUTE_NOT_FOUND` | No |
//! | [`NavError::EmptyHistory`] | `NAV_EMPTY_HISTORY` | No |

use crate::GuardPhase;
use folio_types::{ErrorCode, Location};
use std::sync::Arc;
use thiserror::Error;

/// Observer notified of every failed transition.
///
/// Registered once at router construction; used for out-of-band failure
/// notifications (toast, error reporter).
pub type ErrorObserver = Arc<dyn Fn(&NavError) + Send + Sync>;

/// Navigation layer error.
///
/// # Example
///
/// ```
/// use folio_nav::{GuardPhase, NavError};
/// use folio_types::ErrorCode;
///
/// let err = NavError::GuardFailed {
///     guard: "preload-overview".into(),
///     phase: GuardPhase::Entering,
///     reason: "service unavailable".into(),
/// };
///
/// assert_eq!(err.code(), "NAV_GUARD_FAILED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, Error)]
pub enum NavError {
    /// A guard raised an unexpected error (remote preload failure,
    /// broken invariant). Recoverable: the user can retry the
    /// navigation once the underlying cause clears.
    #[error("guard '{guard}' failed during {phase}: {reason}")]
    GuardFailed {
        /// Name of the failing guard.
        guard: String,
        /// Phase it ran in.
        phase: GuardPhase,
        /// The guard's own error message.
        reason: String,
    },

    /// The redirect chain exceeded the configured bound.
    ///
    /// Distinct from a guard failure so a misconfigured route cycle is
    /// diagnosable at a glance.
    #[error("redirect chain exceeded {limit} hops at {location}")]
    RedirectLoopExceeded {
        /// The configured hop limit.
        limit: usize,
        /// The location the chain was at when the bound tripped.
        location: Location,
    },

    /// No route resolves the requested location.
    #[error("no route resolves {location}")]
    RouteNotFound {
        /// The unresolved target.
        location: Location,
    },

    /// `navigate_back` was called with an empty history stack.
    #[error("navigation history is empty")]
    EmptyHistory,
}

impl ErrorCode for NavError {
    fn code(&self) -> &'static str {
        match self {
            Self::GuardFailed { .. } => "NAV_GUARD_FAILED",
            Self::RedirectLoopExceeded { .. } => "NAV_REDIRECT_LOOP",
            Self::RouteNotFound { .. } => "NAV_ROUTE_NOT_FOUND",
            Self::EmptyHistory => "NAV_EMPTY_HISTORY",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::GuardFailed { .. } => true,
            Self::RedirectLoopExceeded { .. } => false,
            Self::RouteNotFound { .. } => false,
            Self::EmptyHistory => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::assert_error_codes;

    fn all_variants() -> Vec<NavError> {
        vec![
            NavError::GuardFailed {
                guard: "g".into(),
                phase: GuardPhase::Global,
                reason: "x".into(),
            },
            NavError::RedirectLoopExceeded {
                limit: 10,
                location: Location::path("/loop"),
            },
            NavError::RouteNotFound {
                location: Location::path("/nowhere"),
            },
            NavError::EmptyHistory,
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "NAV_");
    }

    #[test]
    fn guard_failure_is_recoverable() {
        let err = NavError::GuardFailed {
            guard: "preload".into(),
            phase: GuardPhase::Entering,
            reason: "503".into(),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("preload"));
        assert!(err.to_string().contains("entering"));
    }

    #[test]
    fn redirect_loop_is_configuration_error() {
        let err = NavError::RedirectLoopExceeded {
            limit: 10,
            location: Location::path("/a"),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("10"));
    }
}
