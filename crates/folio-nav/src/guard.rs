//! Guard traits.
//!
//! A guard is a named asynchronous predicate over `(to, from)` that
//! resolves to a [`Disposition`]. Guards come in three flavors:
//!
//! - [`Guard`]: free-standing; used for global guards (installed once
//!   at startup) and for route-level entering guards, which run before
//!   the target page instance exists.
//! - [`LeavingGuard`]: capability a page type implements to intercept
//!   navigation *away* from itself (unsaved-changes prompts).
//! - [`UpdateGuard`]: capability a page type implements to accept or
//!   refuse parameter changes while staying mounted (`/share-info/:ticker`
//!   switching tickers).
//!
//! Capabilities are declared by implementing the trait and exposing it
//! through the page's accessor, not discovered by runtime shape
//! inspection; the router checks presence once per transition.
//!
//! Guards may suspend (remote preloads, confirmation dialogs). While one
//! is suspended its transition waits, but independent work (event
//! dispatches, other components' timers) keeps running.

use crate::Disposition;
use folio_types::Location;

/// Free-standing asynchronous guard.
///
/// # Example
///
/// ```
/// use folio_nav::{Disposition, Guard};
/// use folio_types::Location;
///
/// struct SessionGuard;
///
/// #[async_trait::async_trait]
/// impl Guard for SessionGuard {
///     fn name(&self) -> &str {
///         "session"
///     }
///
///     async fn check(&self, _to: &Location, _from: &Location) -> Disposition {
///         // A real guard would consult the auth service here.
///         Disposition::Continue
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Guard: Send + Sync {
    /// Stable name used in transition records and logs.
    fn name(&self) -> &str;

    /// Decides what happens to the transition.
    async fn check(&self, to: &Location, from: &Location) -> Disposition;
}

/// Capability: the page wants a say before being left.
#[async_trait::async_trait]
pub trait LeavingGuard: Send + Sync {
    /// Runs before the page is destroyed for a transition to `to`.
    async fn before_leave(&self, to: &Location, from: &Location) -> Disposition;
}

/// Capability: the page can absorb a parameter change without remount.
#[async_trait::async_trait]
pub trait UpdateGuard: Send + Sync {
    /// Runs when the active route is re-targeted with new parameters.
    async fn before_update(&self, to: &Location, from: &Location) -> Disposition;
}
