//! Process-wide publish/subscribe registry.
//!
//! The [`EventBus`] decouples page components: a publisher never knows
//! who listens, and a subscriber never references the publisher. One bus
//! is created at application start and passed around as an injected
//! handle (`Arc<EventBus>`); there is no ambient singleton.
//!
//! # Dispatch Semantics
//!
//! - Handlers for one key run **synchronously, in registration order**.
//! - [`publish`](EventBus::publish) invokes exactly the handlers that
//!   were subscribed when the call began: a handler registered *during*
//!   the dispatch only sees the next publish, and a handler removed
//!   mid-dispatch is skipped if it has not run yet.
//! - A failing handler is reported and skipped over; the remaining
//!   handlers still run and the publisher observes nothing.
//! - No ordering guarantee exists across different keys, and the bus
//!   keeps no history: a late subscriber never observes earlier events.
//!
//! # Ownership
//!
//! Every subscription is tagged with the [`PageInstanceId`] of the page
//! that owns it. When a page is destroyed, the lifecycle binder calls
//! [`unsubscribe_owner`](EventBus::unsubscribe_owner) and all of that
//! page's subscriptions disappear atomically, which is what makes
//! dispatch to a destroyed page impossible.
//!
//! # Example
//!
//! ```
//! use folio_event::{EventBus, EventKey};
//! use folio_types::PageInstanceId;
//! use serde_json::json;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let bus = EventBus::new();
//! let owner = PageInstanceId::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let seen_in_handler = Arc::clone(&seen);
//! bus.subscribe(EventKey::TradeCreated, owner, move |_payload| {
//!     seen_in_handler.fetch_add(1, Ordering::SeqCst);
//!     Ok(())
//! });
//!
//! bus.publish(&EventKey::TradeCreated, &json!({"id": 42}));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//! bus.unsubscribe_owner(owner);
//! bus.publish(&EventKey::TradeCreated, &json!({"id": 43}));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use crate::{EventError, EventKey};
use folio_types::{PageInstanceId, SubscriptionId};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler invoked for each published event on a subscribed key.
///
/// The payload is borrowed for the duration of the call. Returning an
/// error marks the invocation failed; it is reported via the error sink
/// but never stops the dispatch.
pub type EventHandler = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Sink receiving handler failure reports.
pub type ErrorSink = Arc<dyn Fn(&EventError) + Send + Sync>;

struct Entry {
    id: SubscriptionId,
    owner: PageInstanceId,
    handler: EventHandler,
}

/// Cross-component event bus.
///
/// Cheap to share: all methods take `&self`; wrap in an `Arc` and clone
/// the handle. Handlers are invoked outside the registry lock, so a
/// handler may itself subscribe, unsubscribe or publish.
pub struct EventBus {
    registry: Mutex<HashMap<EventKey, Vec<Entry>>>,
    error_sink: RwLock<Option<ErrorSink>>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
            error_sink: RwLock::new(None),
        }
    }

    /// Registers a sink for handler failure reports.
    ///
    /// At most one sink is active; a second call replaces the first.
    /// Failures are always logged regardless of the sink.
    pub fn set_error_sink(&self, sink: ErrorSink) {
        *self.error_sink.write() = Some(sink);
    }

    /// Subscribes `handler` to `key` on behalf of `owner`.
    ///
    /// Handlers are appended, never deduplicated: subscribing the same
    /// closure twice means it runs twice per publish. Returns the id
    /// for exact-pair removal via [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, key: EventKey, owner: PageInstanceId, handler: F) -> SubscriptionId
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.subscribe_handler(key, owner, Arc::new(handler))
    }

    /// Subscribes an already-shared [`EventHandler`].
    ///
    /// Used by the lifecycle binder, which receives handlers from page
    /// declarations rather than fresh closures.
    pub fn subscribe_handler(
        &self,
        key: EventKey,
        owner: PageInstanceId,
        handler: EventHandler,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        let mut registry = self.registry.lock();
        registry.entry(key.clone()).or_default().push(Entry {
            id,
            owner,
            handler,
        });
        debug!(%key, %owner, %id, "subscribed");
        id
    }

    /// Removes the exact `(key, id)` subscription.
    ///
    /// Removing an id that is no longer registered is a no-op.
    pub fn unsubscribe(&self, key: &EventKey, id: SubscriptionId) {
        let mut registry = self.registry.lock();
        if let Some(entries) = registry.get_mut(key) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                registry.remove(key);
            }
        }
        debug!(%key, %id, "unsubscribed");
    }

    /// Removes every subscription for `key`.
    pub fn unsubscribe_key(&self, key: &EventKey) {
        let removed = self.registry.lock().remove(key).map_or(0, |v| v.len());
        debug!(%key, removed, "unsubscribed key");
    }

    /// Atomically removes every subscription owned by `owner`.
    ///
    /// Returns the number of subscriptions removed. This is the
    /// teardown path: after it returns, no publish can reach any
    /// handler the owner registered.
    pub fn unsubscribe_owner(&self, owner: PageInstanceId) -> usize {
        let mut registry = self.registry.lock();
        let mut removed = 0;
        registry.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|e| e.owner != owner);
            removed += before - entries.len();
            !entries.is_empty()
        });
        debug!(%owner, removed, "unsubscribed owner");
        removed
    }

    /// Publishes `payload` to every current subscriber of `key`.
    ///
    /// Returns the number of handlers invoked. The subscriber list is
    /// snapshotted when the call begins; each handler's registration is
    /// re-checked just before it runs so that mid-dispatch removals are
    /// honored.
    pub fn publish(&self, key: &EventKey, payload: &Value) -> usize {
        let snapshot: Vec<(SubscriptionId, EventHandler)> = {
            let registry = self.registry.lock();
            registry
                .get(key)
                .map(|entries| {
                    entries
                        .iter()
                        .map(|e| (e.id, Arc::clone(&e.handler)))
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut invoked = 0;
        for (id, handler) in snapshot {
            let still_registered = {
                let registry = self.registry.lock();
                registry
                    .get(key)
                    .is_some_and(|entries| entries.iter().any(|e| e.id == id))
            };
            if !still_registered {
                continue;
            }

            invoked += 1;
            if let Err(message) = handler.as_ref()(payload) {
                let err = EventError::HandlerFailed {
                    key: key.clone(),
                    subscription: id,
                    message,
                };
                warn!(%key, %id, error = %err, "event handler failed");
                if let Some(sink) = self.error_sink.read().as_ref() {
                    sink(&err);
                }
            }
        }

        debug!(%key, invoked, "published");
        invoked
    }

    /// Returns the number of current subscriptions for `key`.
    #[must_use]
    pub fn subscriber_count(&self, key: &EventKey) -> usize {
        self.registry.lock().get(key).map_or(0, |v| v.len())
    }

    /// Returns the number of current subscriptions owned by `owner`.
    #[must_use]
    pub fn owner_subscription_count(&self, owner: PageInstanceId) -> usize {
        self.registry
            .lock()
            .values()
            .flat_map(|entries| entries.iter())
            .filter(|e| e.owner == owner)
            .count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
