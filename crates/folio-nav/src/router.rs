//! The transition controller.
//!
//! [`Router`] runs one navigation request end-to-end: it resolves the
//! target against the route table, evaluates the ordered guard chain,
//! and applies the outcome: swapping the active page on success,
//! retrying at a new location on redirect, or leaving everything
//! untouched on cancel/failure.
//!
//! # State Machine
//!
//! ```text
//!            navigate(loc)
//! Idle ────────────────────► Evaluating
//!                               │ leaving → global → permission → entering
//!        cancel ◄───────────────┤
//!        fail   ◄───────────────┤              (first non-continue wins)
//!        redirect: fresh attempt┘
//!                               │ all continue
//!                               ▼
//!                           Proceeding
//!                               │ destroy old → unsubscribe → construct
//!                               │ new → subscribe → mount callbacks
//!                               ▼
//!                             Idle (next queued request runs)
//! ```
//!
//! Requests are serialized: a `navigate` call that arrives while another
//! transition is evaluating waits its turn on the controller's async
//! lock. At most one transition is ever in flight, which is what makes
//! page construction/destruction races impossible.
//!
//! # Failure Policy
//!
//! Guard-local errors never cross the controller boundary as panics or
//! stray results. Every failure becomes a `Failed` transition plus one
//! notification to the registered error observer, and the user stays on
//! the current page.

use crate::binder::LifecycleBinder;
use crate::disposition::{Disposition, GuardPhase, MountCallback};
use crate::error::{ErrorObserver, NavError};
use crate::page::Page;
use crate::route::RouteTable;
use crate::transition::{OutcomeKind, Transition, TransitionStatus};
use crate::Guard;
use folio_event::EventBus;
use folio_gate::PermissionGate;
use folio_types::Location;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default bound on redirect chains before the transition fails.
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;

/// Record name used for the permission gate in transition records.
const GATE_RECORD_NAME: &str = "permission-gate";

struct ActivePage {
    location: Location,
    page: Option<Box<dyn Page>>,
}

/// Outcome of applying one guard disposition to the chain.
enum Step {
    Continue,
    Stop,
    Redirect(Location),
}

/// The navigation transition controller.
///
/// Built once at startup via [`Router::builder`] and shared as an
/// `Arc`. See the module docs for the state machine.
///
/// # Example
///
/// ```
/// use folio_event::EventBus;
/// use folio_gate::testing::{BlockingDialogStub, StaticEntitlements};
/// use folio_gate::{DialogOutcome, Entitlements, PermissionGate};
/// use folio_nav::testing::TestPage;
/// use folio_nav::{Route, RouteTable, Router};
/// use folio_types::Location;
/// use std::sync::Arc;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let bus = Arc::new(EventBus::new());
/// let gate = PermissionGate::new(
///     Arc::new(StaticEntitlements::new(Entitlements::none())),
///     Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined)),
/// );
/// let table = RouteTable::new()
///     .with_route(Route::new("portfolio", "/portfolio", |_| {
///         Box::new(TestPage::new("portfolio"))
///     }));
///
/// let router = Router::builder(table, bus, gate).build();
/// let transition = router.navigate(Location::path("/portfolio")).await;
///
/// assert!(transition.completed());
/// assert_eq!(router.current_location().await.path, "/portfolio");
/// # });
/// ```
pub struct Router {
    table: RouteTable,
    global_guards: Vec<Arc<dyn Guard>>,
    gate: PermissionGate,
    binder: LifecycleBinder,
    active: tokio::sync::Mutex<ActivePage>,
    history: Mutex<Vec<Location>>,
    redirect_limit: usize,
    observer: Option<ErrorObserver>,
}

impl Router {
    /// Starts building a router over the given table, bus and gate.
    #[must_use]
    pub fn builder(table: RouteTable, bus: Arc<EventBus>, gate: PermissionGate) -> RouterBuilder {
        RouterBuilder {
            table,
            bus,
            gate,
            global_guards: Vec::new(),
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            observer: None,
            initial: Location::path("/"),
        }
    }

    /// Navigates to `to` and resolves once the attempt settles.
    ///
    /// Returns the final [`Transition`]: the completed one, or the
    /// cancelled/failed attempt. With redirects, intermediate attempts
    /// are superseded and the last attempt is returned.
    pub async fn navigate(&self, to: Location) -> Transition {
        let mut active = self.active.lock().await;
        let had_page = active.page.is_some();
        let previous = active.location.clone();

        let transition = self.run(&mut active, to).await;

        if transition.completed() && had_page && previous != active.location {
            self.history.lock().push(previous);
        }
        transition
    }

    /// Navigates to the most recent completed location.
    ///
    /// A cancelled or failed back-navigation restores the popped entry
    /// so it can be retried. With an empty history the attempt fails
    /// with [`NavError::EmptyHistory`].
    pub async fn navigate_back(&self) -> Transition {
        let mut active = self.active.lock().await;

        let Some(target) = self.history.lock().pop() else {
            let here = active.location.clone();
            let mut transition = Transition::new(here.clone(), here);
            let err = NavError::EmptyHistory;
            warn!("navigate_back with empty history");
            self.report(&err);
            transition.fail(err);
            return transition;
        };

        let transition = self.run(&mut active, target.clone()).await;
        if !transition.completed() {
            self.history.lock().push(target);
        }
        transition
    }

    /// Returns the current location.
    pub async fn current_location(&self) -> Location {
        self.active.lock().await.location.clone()
    }

    /// Returns the active page's route name, if a page is mounted.
    pub async fn active_route(&self) -> Option<String> {
        let active = self.active.lock().await;
        active.page.as_ref().map(|p| p.route_name().to_string())
    }

    /// Runs `f` against the active page under the navigation lock.
    ///
    /// This is how the rendering layer reads page state without racing
    /// a swap.
    pub async fn inspect_active<R>(&self, f: impl FnOnce(Option<&dyn Page>) -> R) -> R {
        let active = self.active.lock().await;
        f(active.page.as_deref())
    }

    /// Returns how many locations the back stack holds.
    #[must_use]
    pub fn history_depth(&self) -> usize {
        self.history.lock().len()
    }

    /// Runs one navigation request, following redirects.
    async fn run(&self, active: &mut ActivePage, requested: Location) -> Transition {
        let mut target = requested;
        let mut hops = 0usize;

        loop {
            let from = active.location.clone();

            let Some(resolved) = self.table.resolve(&target) else {
                let mut transition = Transition::new(from, target.clone());
                let err = NavError::RouteNotFound { location: target };
                warn!(%err, "navigation target unresolvable");
                self.report(&err);
                transition.fail(err);
                return transition;
            };
            let route = resolved.route;
            let dest = resolved.location;

            let mut transition = Transition::new(from.clone(), dest.clone());
            info!(id = %transition.id, %from, to = %dest, "transition started");

            // Redirect-only routes (wildcard fallback) are one hop.
            if let Some(redirect) = route.redirect_target() {
                transition.resolve(TransitionStatus::Redirected);
                hops += 1;
                if hops > self.redirect_limit {
                    return self.fail_redirect_loop(from, redirect.clone());
                }
                debug!(id = %transition.id, to = %redirect, hop = hops, "route redirect");
                target = redirect.clone();
                continue;
            }

            // Same route, new params: the page is reused, not remounted.
            let update_flow = active
                .page
                .as_ref()
                .is_some_and(|p| p.route_name() == route.name());

            let mut callbacks: Vec<MountCallback> = Vec::new();

            if !update_flow {
                if let Some(guard) = active.page.as_ref().and_then(|p| p.as_leaving_guard()) {
                    let disposition = guard.before_leave(&dest, &from).await;
                    match self.apply(
                        &mut transition,
                        "leaving",
                        GuardPhase::Leaving,
                        disposition,
                        &mut callbacks,
                    ) {
                        Step::Continue => {}
                        Step::Stop => return transition,
                        Step::Redirect(loc) => {
                            hops += 1;
                            if hops > self.redirect_limit {
                                return self.fail_redirect_loop(from, loc);
                            }
                            target = loc;
                            continue;
                        }
                    }
                }
            }

            let mut redirected_to = None;
            for guard in &self.global_guards {
                let disposition = guard.check(&dest, &from).await;
                match self.apply(
                    &mut transition,
                    guard.name(),
                    GuardPhase::Global,
                    disposition,
                    &mut callbacks,
                ) {
                    Step::Continue => {}
                    Step::Stop => return transition,
                    Step::Redirect(loc) => {
                        redirected_to = Some(loc);
                        break;
                    }
                }
            }
            if let Some(loc) = redirected_to {
                hops += 1;
                if hops > self.redirect_limit {
                    return self.fail_redirect_loop(from, loc);
                }
                target = loc;
                continue;
            }

            if let Some(required) = route.required_permission() {
                let decision = self.gate.check_entitlement(required).await;
                if decision.is_granted() {
                    transition.record(GATE_RECORD_NAME, GuardPhase::Permission, OutcomeKind::Continue);
                } else {
                    transition.record(GATE_RECORD_NAME, GuardPhase::Permission, OutcomeKind::Cancel);
                    info!(
                        id = %transition.id,
                        %required,
                        reason = ?decision.reason,
                        "entry refused by permission gate"
                    );
                    transition.resolve(TransitionStatus::Cancelled);
                    return transition;
                }
            }

            if update_flow {
                if let Some(guard) = active.page.as_ref().and_then(|p| p.as_update_guard()) {
                    let disposition = guard.before_update(&dest, &from).await;
                    match self.apply(
                        &mut transition,
                        "update",
                        GuardPhase::Update,
                        disposition,
                        &mut callbacks,
                    ) {
                        Step::Continue => {}
                        Step::Stop => return transition,
                        Step::Redirect(loc) => {
                            hops += 1;
                            if hops > self.redirect_limit {
                                return self.fail_redirect_loop(from, loc);
                            }
                            target = loc;
                            continue;
                        }
                    }
                }
                active.location = dest;
                transition.resolve(TransitionStatus::Proceeding);
                info!(id = %transition.id, "transition completed in place");
                return transition;
            }

            let mut entering_redirect = None;
            for guard in route.entering_guards() {
                let disposition = guard.check(&dest, &from).await;
                match self.apply(
                    &mut transition,
                    guard.name(),
                    GuardPhase::Entering,
                    disposition,
                    &mut callbacks,
                ) {
                    Step::Continue => {}
                    Step::Stop => return transition,
                    Step::Redirect(loc) => {
                        entering_redirect = Some(loc);
                        break;
                    }
                }
            }
            if let Some(loc) = entering_redirect {
                hops += 1;
                if hops > self.redirect_limit {
                    return self.fail_redirect_loop(from, loc);
                }
                target = loc;
                continue;
            }

            // All guards passed: swap. From here the transition runs to
            // completion; cancellation is no longer possible.
            if let Some(old) = active.page.take() {
                self.binder.teardown(old);
            }
            let Some(mut page) = self.binder.setup(route, &dest) else {
                // A route with neither page nor redirect cannot be entered.
                let err = NavError::RouteNotFound { location: dest };
                warn!(%err, "route has no page factory");
                self.report(&err);
                transition.fail(err);
                return transition;
            };
            for callback in callbacks {
                callback(page.as_mut());
            }
            active.page = Some(page);
            active.location = dest;
            transition.resolve(TransitionStatus::Proceeding);
            info!(id = %transition.id, location = %active.location, "transition completed");
            return transition;
        }
    }

    /// Applies one disposition to the in-flight transition.
    fn apply(
        &self,
        transition: &mut Transition,
        guard: &str,
        phase: GuardPhase,
        disposition: Disposition,
        callbacks: &mut Vec<MountCallback>,
    ) -> Step {
        debug!(id = %transition.id, guard, %phase, ?disposition, "guard resolved");
        match disposition {
            Disposition::Continue => {
                transition.record(guard, phase, OutcomeKind::Continue);
                Step::Continue
            }
            Disposition::ContinueWith(callback) => {
                transition.record(guard, phase, OutcomeKind::Continue);
                if phase == GuardPhase::Entering {
                    callbacks.push(callback);
                } else {
                    warn!(guard, %phase, "mount callback outside entering phase dropped");
                }
                Step::Continue
            }
            Disposition::Cancel => {
                transition.record(guard, phase, OutcomeKind::Cancel);
                transition.resolve(TransitionStatus::Cancelled);
                info!(id = %transition.id, guard, "transition cancelled");
                Step::Stop
            }
            Disposition::Redirect(location) => {
                transition.record(guard, phase, OutcomeKind::Redirect);
                transition.resolve(TransitionStatus::Redirected);
                Step::Redirect(location)
            }
            Disposition::Fail { reason } => {
                transition.record(guard, phase, OutcomeKind::Fail);
                let err = NavError::GuardFailed {
                    guard: guard.to_string(),
                    phase,
                    reason,
                };
                warn!(id = %transition.id, %err, "guard failed");
                self.report(&err);
                transition.fail(err);
                Step::Stop
            }
        }
    }

    /// Builds the failed transition for an exhausted redirect chain.
    fn fail_redirect_loop(&self, from: Location, location: Location) -> Transition {
        let mut transition = Transition::new(from, location.clone());
        let err = NavError::RedirectLoopExceeded {
            limit: self.redirect_limit,
            location,
        };
        warn!(%err, "redirect chain exhausted");
        self.report(&err);
        transition.fail(err);
        transition
    }

    fn report(&self, err: &NavError) {
        if let Some(observer) = &self.observer {
            observer(err);
        }
    }
}

/// Builder for [`Router`].
pub struct RouterBuilder {
    table: RouteTable,
    bus: Arc<EventBus>,
    gate: PermissionGate,
    global_guards: Vec<Arc<dyn Guard>>,
    redirect_limit: usize,
    observer: Option<ErrorObserver>,
    initial: Location,
}

impl RouterBuilder {
    /// Appends a global guard (declaration order kept; installed once,
    /// applied to every transition).
    #[must_use]
    pub fn with_global_guard(mut self, guard: Arc<dyn Guard>) -> Self {
        self.global_guards.push(guard);
        self
    }

    /// Overrides the redirect-chain bound.
    #[must_use]
    pub fn with_redirect_limit(mut self, limit: usize) -> Self {
        self.redirect_limit = limit;
        self
    }

    /// Registers the single error observer.
    #[must_use]
    pub fn with_error_observer(mut self, observer: ErrorObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the location the router starts at (default `/`).
    ///
    /// No page is mounted for it; the first `navigate` does that.
    #[must_use]
    pub fn with_initial_location(mut self, location: Location) -> Self {
        self.initial = location;
        self
    }

    /// Builds the router.
    #[must_use]
    pub fn build(self) -> Router {
        Router {
            table: self.table,
            global_guards: self.global_guards,
            gate: self.gate,
            binder: LifecycleBinder::new(self.bus),
            active: tokio::sync::Mutex::new(ActivePage {
                location: self.initial,
                page: None,
            }),
            history: Mutex::new(Vec::new()),
            redirect_limit: self.redirect_limit,
            observer: self.observer,
        }
    }
}
