//! Test doubles for guards and pages.
//!
//! Used by this crate's own tests and by application tests to script
//! navigation scenarios without real pages or services.

use crate::{Disposition, Guard, LeavingGuard, Page, UpdateGuard};
use crate::page::EventBinding;
use folio_event::EventKey;
use folio_types::{Location, PageInstanceId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type GuardAction = Box<dyn Fn(&Location, &Location) -> Disposition + Send + Sync>;

/// A guard returning a scripted disposition on every check.
///
/// Tracks invocation count so tests can assert short-circuiting.
pub struct MockGuard {
    name: String,
    action: GuardAction,
    calls: Arc<AtomicUsize>,
}

impl MockGuard {
    /// Creates a guard that always continues.
    #[must_use]
    pub fn pass_through(name: &str) -> Self {
        Self::with_action(name, |_, _| Disposition::Continue)
    }

    /// Creates a guard that always cancels.
    #[must_use]
    pub fn canceller(name: &str) -> Self {
        Self::with_action(name, |_, _| Disposition::Cancel)
    }

    /// Creates a guard that always redirects to `target`.
    #[must_use]
    pub fn redirector(name: &str, target: Location) -> Self {
        Self::with_action(name, move |_, _| Disposition::Redirect(target.clone()))
    }

    /// Creates a guard that always fails with `reason`.
    #[must_use]
    pub fn failer(name: &str, reason: &str) -> Self {
        let reason = reason.to_string();
        Self::with_action(name, move |_, _| Disposition::fail(reason.clone()))
    }

    /// Creates a guard from an arbitrary action.
    #[must_use]
    pub fn with_action<F>(name: &str, action: F) -> Self
    where
        F: Fn(&Location, &Location) -> Disposition + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            action: Box::new(action),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many times the guard has run.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns a handle to the call counter.
    #[must_use]
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl Guard for MockGuard {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, to: &Location, from: &Location) -> Disposition {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.action)(to, from)
    }
}

struct ScriptedLeaving {
    action: GuardAction,
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl LeavingGuard for ScriptedLeaving {
    async fn before_leave(&self, to: &Location, from: &Location) -> Disposition {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.action)(to, from)
    }
}

struct ScriptedUpdate {
    action: GuardAction,
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl UpdateGuard for ScriptedUpdate {
    async fn before_update(&self, to: &Location, from: &Location) -> Disposition {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.action)(to, from)
    }
}

/// A configurable page for router tests.
///
/// Subscriptions count their hits, destruction is counted, and the
/// optional leaving/update guards run scripted actions. The `note`
/// slot lets mount callbacks leave evidence that they ran.
pub struct TestPage {
    id: PageInstanceId,
    route_name: String,
    subscriptions: Vec<(EventKey, Arc<AtomicUsize>)>,
    destroyed: Arc<AtomicUsize>,
    leaving: Option<ScriptedLeaving>,
    update: Option<ScriptedUpdate>,
    note: Mutex<Option<String>>,
}

impl TestPage {
    /// Creates a page for `route_name` with no hooks.
    #[must_use]
    pub fn new(route_name: &str) -> Self {
        Self {
            id: PageInstanceId::new(),
            route_name: route_name.to_string(),
            subscriptions: Vec::new(),
            destroyed: Arc::new(AtomicUsize::new(0)),
            leaving: None,
            update: None,
            note: Mutex::new(None),
        }
    }

    /// Declares a subscription whose handler counts invocations.
    #[must_use]
    pub fn with_subscription(self, key: EventKey) -> Self {
        let counter = Arc::new(AtomicUsize::new(0));
        self.with_subscription_counter(key, counter)
    }

    /// Declares a subscription counting into a caller-held counter.
    #[must_use]
    pub fn with_subscription_counter(mut self, key: EventKey, counter: Arc<AtomicUsize>) -> Self {
        self.subscriptions.push((key, counter));
        self
    }

    /// Installs a scripted leaving guard.
    #[must_use]
    pub fn with_leaving<F>(mut self, action: F) -> Self
    where
        F: Fn(&Location, &Location) -> Disposition + Send + Sync + 'static,
    {
        self.leaving = Some(ScriptedLeaving {
            action: Box::new(action),
            calls: Arc::new(AtomicUsize::new(0)),
        });
        self
    }

    /// Installs a scripted update guard.
    #[must_use]
    pub fn with_update<F>(mut self, action: F) -> Self
    where
        F: Fn(&Location, &Location) -> Disposition + Send + Sync + 'static,
    {
        self.update = Some(ScriptedUpdate {
            action: Box::new(action),
            calls: Arc::new(AtomicUsize::new(0)),
        });
        self
    }

    /// Returns a handle to the destruction counter.
    #[must_use]
    pub fn destroy_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.destroyed)
    }

    /// Returns how many publishes reached the handler for `key`.
    #[must_use]
    pub fn hits(&self, key: &EventKey) -> usize {
        self.subscriptions
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, c)| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Returns how many times the leaving guard ran.
    #[must_use]
    pub fn leaving_calls(&self) -> usize {
        self.leaving.as_ref().map_or(0, |g| g.calls.load(Ordering::SeqCst))
    }

    /// Returns how many times the update guard ran.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.update.as_ref().map_or(0, |g| g.calls.load(Ordering::SeqCst))
    }

    /// Stores a note (typically from a mount callback).
    pub fn set_note(&self, note: impl Into<String>) {
        *self.note.lock() = Some(note.into());
    }

    /// Returns the stored note, if any.
    #[must_use]
    pub fn note(&self) -> Option<String> {
        self.note.lock().clone()
    }
}

impl Page for TestPage {
    fn id(&self) -> PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        &self.route_name
    }

    fn subscriptions(&self) -> Vec<EventBinding> {
        self.subscriptions
            .iter()
            .map(|(key, counter)| {
                let counter = Arc::clone(counter);
                EventBinding::new(key.clone(), move |_payload| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect()
    }

    fn on_destroy(&mut self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }

    fn as_leaving_guard(&self) -> Option<&dyn LeavingGuard> {
        self.leaving.as_ref().map(|g| g as &dyn LeavingGuard)
    }

    fn as_update_guard(&self) -> Option<&dyn UpdateGuard> {
        self.update.as_ref().map(|g| g as &dyn UpdateGuard)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
