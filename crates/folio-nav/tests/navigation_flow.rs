//! End-to-end navigation scenarios across router, binder, bus and gate.

use folio_event::{EventBus, EventKey};
use folio_gate::testing::{BlockingDialogStub, StaticEntitlements};
use folio_gate::{DialogOutcome, Entitlements, PermissionGate};
use folio_nav::testing::{MockGuard, TestPage};
use folio_nav::{Disposition, Guard, Route, RouteTable, Router};
use folio_types::{ErrorCode, Location, Permission};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn portfolio_route() -> Route {
    Route::new("portfolio", "/portfolio", |_| {
        Box::new(TestPage::new("portfolio"))
    })
}

fn gate_for(
    entitlements: Entitlements,
) -> (PermissionGate, Arc<StaticEntitlements>, Arc<BlockingDialogStub>) {
    let provider = Arc::new(StaticEntitlements::new(entitlements));
    let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));
    let gate = PermissionGate::new(Arc::clone(&provider) as _, Arc::clone(&dialogs) as _);
    (gate, provider, dialogs)
}

#[tokio::test]
async fn page_subscriptions_live_and_die_with_the_page() {
    let bus = Arc::new(EventBus::new());
    let asset_created_hits = Arc::new(AtomicUsize::new(0));

    let hits = Arc::clone(&asset_created_hits);
    let table = RouteTable::new()
        .with_route(portfolio_route())
        .with_route(Route::new("quotes", "/quotes", move |_| {
            Box::new(
                TestPage::new("quotes")
                    .with_subscription_counter(EventKey::AssetCreated, Arc::clone(&hits)),
            )
        }));
    let (gate, _, _) = gate_for(Entitlements::none());
    let router = Router::builder(table, Arc::clone(&bus), gate).build();

    assert!(router.navigate(Location::path("/quotes")).await.completed());

    // A sibling component publishes while the page is mounted.
    bus.publish(&EventKey::AssetCreated, &json!({"id": 42}));
    assert_eq!(asset_created_hits.load(Ordering::SeqCst), 1);

    // After the page is destroyed its handler must never fire again.
    assert!(router.navigate(Location::path("/portfolio")).await.completed());
    bus.publish(&EventKey::AssetCreated, &json!({"id": 43}));
    assert_eq!(asset_created_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn restricted_section_denied_then_granted_after_upgrade() {
    let bus = Arc::new(EventBus::new());
    let table = RouteTable::new()
        .with_route(portfolio_route())
        .with_route(
            Route::new("combined-portfolio", "/combined-portfolio", |_| {
                Box::new(TestPage::new("combined-portfolio"))
            })
            .with_permission(Permission::CombinedPortfolio),
        );
    let (gate, provider, dialogs) = gate_for(Entitlements::none());
    let router = Router::builder(table, bus, gate).build();

    assert!(router.navigate(Location::path("/portfolio")).await.completed());

    let denied = router
        .navigate(Location::path("/combined-portfolio"))
        .await;
    assert!(denied.cancelled());
    assert_eq!(dialogs.shown(), 1);
    assert_eq!(router.active_route().await.as_deref(), Some("portfolio"));

    // Plan upgrade between navigations: the next snapshot must grant.
    provider.replace(Entitlements::of([Permission::CombinedPortfolio]));
    let granted = router
        .navigate(Location::path("/combined-portfolio"))
        .await;
    assert!(granted.completed());
    assert_eq!(dialogs.shown(), 1);
    assert_eq!(
        router.active_route().await.as_deref(),
        Some("combined-portfolio")
    );
}

#[tokio::test]
async fn redirect_route_chain_lands_on_final_target() {
    let bus = Arc::new(EventBus::new());
    let table = RouteTable::new()
        .with_route(portfolio_route())
        .with_route(Route::redirect(
            "legacy-portfolio",
            "/old-portfolio",
            Location::path("/portfolio"),
        ))
        .with_route(Route::redirect(
            "fallback",
            "*",
            Location::path("/old-portfolio"),
        ));
    let (gate, _, _) = gate_for(Entitlements::none());
    let router = Router::builder(table, bus, gate).build();

    // Unknown path → wildcard → legacy route → portfolio: two hops.
    let transition = router.navigate(Location::path("/typo")).await;

    assert!(transition.completed());
    assert_eq!(transition.to.path, "/portfolio");
    assert_eq!(router.current_location().await.path, "/portfolio");
}

#[tokio::test]
async fn failed_preload_notifies_observer_and_preserves_page() {
    let bus = Arc::new(EventBus::new());
    let observed = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let table = RouteTable::new()
        .with_route(portfolio_route())
        .with_route(
            Route::new("trades", "/trades", |_| Box::new(TestPage::new("trades")))
                .with_entering_guard(Arc::new(MockGuard::failer(
                    "preload-trades",
                    "portfolio service returned 503",
                ))),
        );
    let (gate, _, _) = gate_for(Entitlements::none());
    let codes = Arc::clone(&observed);
    let router = Router::builder(table, bus, gate)
        .with_error_observer(Arc::new(move |err| {
            codes.lock().push(err.code().to_string());
        }))
        .build();

    assert!(router.navigate(Location::path("/portfolio")).await.completed());
    let transition = router.navigate(Location::path("/trades")).await;

    assert!(transition.failed());
    assert_eq!(observed.lock().as_slice(), &["NAV_GUARD_FAILED".to_string()]);
    assert_eq!(router.active_route().await.as_deref(), Some("portfolio"));
    assert_eq!(router.current_location().await.path, "/portfolio");
}

/// A page with an unsaved draft: leaving requires user confirmation
/// through the blocking dialog, awaited inside the guard.
struct DraftTradesPage {
    id: folio_types::PageInstanceId,
    dialogs: Arc<BlockingDialogStub>,
}

#[async_trait::async_trait]
impl folio_nav::LeavingGuard for DraftTradesPage {
    async fn before_leave(&self, _to: &Location, _from: &Location) -> Disposition {
        use folio_gate::{DialogDescriptor, DialogService};

        let outcome = self
            .dialogs
            .show(DialogDescriptor::confirm("Discard the unsaved trade?"))
            .await;
        if outcome.is_confirmed() {
            Disposition::Continue
        } else {
            Disposition::Cancel
        }
    }
}

impl folio_nav::Page for DraftTradesPage {
    fn id(&self) -> folio_types::PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        "trades"
    }

    fn as_leaving_guard(&self) -> Option<&dyn folio_nav::LeavingGuard> {
        Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[tokio::test]
async fn confirmation_prompt_gates_departure() {
    let bus = Arc::new(EventBus::new());
    let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));

    let prompt = Arc::clone(&dialogs);
    let table = RouteTable::new()
        .with_route(portfolio_route())
        .with_route(Route::new("trades", "/trades", move |_| {
            Box::new(DraftTradesPage {
                id: folio_types::PageInstanceId::new(),
                dialogs: Arc::clone(&prompt),
            })
        }));
    let (gate, _, _) = gate_for(Entitlements::none());
    let router = Router::builder(table, bus, gate).build();

    assert!(router.navigate(Location::path("/trades")).await.completed());

    // User declines to discard the draft: navigation cancelled.
    let first = router.navigate(Location::path("/portfolio")).await;
    assert!(first.cancelled());
    assert_eq!(dialogs.shown(), 1);
    assert_eq!(router.active_route().await.as_deref(), Some("trades"));

    // User confirms on the second attempt.
    dialogs.resolve_with(DialogOutcome::Confirmed);
    let second = router.navigate(Location::path("/portfolio")).await;
    assert!(second.completed());
    assert_eq!(dialogs.shown(), 2);
    assert_eq!(router.active_route().await.as_deref(), Some("portfolio"));
}

#[tokio::test]
async fn global_guard_sees_every_transition() {
    let bus = Arc::new(EventBus::new());
    let audit = Arc::new(MockGuard::pass_through("audit"));

    let table = RouteTable::new()
        .with_route(portfolio_route())
        .with_route(Route::new("trades", "/trades", |_| {
            Box::new(TestPage::new("trades"))
        }));
    let (gate, _, _) = gate_for(Entitlements::none());
    let router = Router::builder(table, bus, gate)
        .with_global_guard(Arc::clone(&audit) as Arc<dyn Guard>)
        .build();

    assert!(router.navigate(Location::path("/portfolio")).await.completed());
    assert!(router.navigate(Location::path("/trades")).await.completed());
    assert!(router.navigate_back().await.completed());

    assert_eq!(audit.calls(), 3);
}
