//! Page component contract.
//!
//! A page is the unit the router swaps: one is active at a time, and
//! its event-bus subscriptions live exactly as long as it does. Pages
//! declare their hooks statically (subscriptions as data, guard
//! capabilities as optional trait accessors) so the lifecycle binder
//! can wire and unwire them without the page managing the bus by hand.

use crate::guard::{LeavingGuard, UpdateGuard};
use folio_event::{EventHandler, EventKey};
use folio_types::PageInstanceId;
use std::any::Any;

/// One declared event subscription: key plus handler.
///
/// The handler typically captures a clone of the page's shared state
/// (`Arc<Mutex<…>>`), not the page itself, because the bus owns it for
/// the page's lifetime.
pub struct EventBinding {
    /// The key to subscribe to.
    pub key: EventKey,
    /// The handler to run per publish.
    pub handler: EventHandler,
}

impl EventBinding {
    /// Creates a binding from a closure.
    #[must_use]
    pub fn new<F>(key: EventKey, handler: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            key,
            handler: std::sync::Arc::new(handler),
        }
    }
}

/// A mountable page component.
///
/// The router constructs a page through its route's factory after the
/// guard chain passes, and destroys it when a later transition leaves
/// the route. Between `on_destroy` and the next page's construction no
/// handler or guard of the old instance can fire.
///
/// # Capabilities
///
/// The default accessors return `None`; a page that wants to intercept
/// departures or absorb parameter updates overrides them:
///
/// ```
/// use folio_nav::{Disposition, LeavingGuard, Page};
/// use folio_types::{Location, PageInstanceId};
///
/// struct DraftPage {
///     id: PageInstanceId,
/// }
///
/// #[async_trait::async_trait]
/// impl LeavingGuard for DraftPage {
///     async fn before_leave(&self, _to: &Location, _from: &Location) -> Disposition {
///         Disposition::Cancel // never let the user leave (don't do this)
///     }
/// }
///
/// impl Page for DraftPage {
///     fn id(&self) -> PageInstanceId {
///         self.id
///     }
///
///     fn route_name(&self) -> &str {
///         "draft"
///     }
///
///     fn as_leaving_guard(&self) -> Option<&dyn LeavingGuard> {
///         Some(self)
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait Page: Send + Sync {
    /// Owner identity for subscriptions and logs.
    fn id(&self) -> PageInstanceId;

    /// Name of the route this instance serves.
    fn route_name(&self) -> &str;

    /// Subscriptions to register at construction.
    ///
    /// Called once by the lifecycle binder, immediately after the
    /// factory returns.
    fn subscriptions(&self) -> Vec<EventBinding> {
        Vec::new()
    }

    /// Teardown hook, called before the instance's subscriptions are
    /// removed and the instance is dropped.
    fn on_destroy(&mut self) {}

    /// Leaving-guard capability, if the page has one.
    fn as_leaving_guard(&self) -> Option<&dyn LeavingGuard> {
        None
    }

    /// Update-guard capability, if the page has one.
    fn as_update_guard(&self) -> Option<&dyn UpdateGuard> {
        None
    }

    /// Concrete-type access for assertions and probes.
    fn as_any(&self) -> &dyn Any;

    /// Concrete-type access for mount callbacks.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
