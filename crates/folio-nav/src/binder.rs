//! Page lifecycle binding.
//!
//! The binder is the bridge between the router's page swap and the
//! event bus: it registers a page's declared subscriptions when the
//! page is constructed and removes every subscription of the page's
//! owner id when it is destroyed.
//!
//! The swap order is the correctness property of the whole shell:
//!
//! ```text
//! destroy old page → unsubscribe old owner → construct new page → subscribe
//! ```
//!
//! Transitions are serialized and dispatch is synchronous, so between
//! the unsubscribe and the new registration nothing can call into a
//! dead page.

use crate::route::Route;
use crate::Page;
use folio_event::EventBus;
use folio_types::Location;
use std::sync::Arc;
use tracing::debug;

/// Wires page construction/destruction to the event bus.
pub struct LifecycleBinder {
    bus: Arc<EventBus>,
}

impl LifecycleBinder {
    /// Creates a binder over the shared bus handle.
    #[must_use]
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }

    /// Destroys a page: runs its teardown hook, then removes all of its
    /// subscriptions.
    pub fn teardown(&self, mut page: Box<dyn Page>) {
        let owner = page.id();
        let route = page.route_name().to_string();
        page.on_destroy();
        let removed = self.bus.unsubscribe_owner(owner);
        debug!(%owner, route, removed, "page destroyed");
    }

    /// Constructs the route's page for `location` and registers its
    /// declared subscriptions.
    ///
    /// Returns `None` for redirect-only routes, which have no page.
    #[must_use]
    pub fn setup(&self, route: &Route, location: &Location) -> Option<Box<dyn Page>> {
        let page = route.instantiate(location)?;
        let owner = page.id();
        let mut registered = 0;
        for binding in page.subscriptions() {
            self.bus.subscribe_handler(binding.key, owner, binding.handler);
            registered += 1;
        }
        debug!(%owner, route = route.name(), registered, "page constructed");
        Some(page)
    }
}
