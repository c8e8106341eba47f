//! Application wiring.
//!
//! [`FolioApp`] assembles the shell: one event bus, one permission
//! gate over the client service, one router over the application route
//! table. Collaborators come in through [`AppServices`] so the same
//! wiring serves production bindings and in-memory test doubles.

use crate::config::AppConfig;
use crate::routes;
use crate::services::{ClientService, MarketDataService, OverviewService};
use folio_event::EventBus;
use folio_gate::{DialogService, EntitlementProvider, PermissionGate};
use folio_nav::{ErrorObserver, Router, Transition};
use folio_types::Location;
use std::sync::Arc;
use tracing::info;

/// The external collaborators the shell consumes.
pub struct AppServices {
    /// Client profile access (plan, portfolios).
    pub client: Arc<dyn ClientService>,
    /// Entitlement snapshots for the permission gate.
    pub entitlements: Arc<dyn EntitlementProvider>,
    /// The blocking dialog binding of the UI layer.
    pub dialogs: Arc<dyn DialogService>,
    /// Portfolio overview access.
    pub overview: Arc<dyn OverviewService>,
    /// Instrument quote access.
    pub market: Arc<dyn MarketDataService>,
}

/// The assembled client shell.
///
/// # Example
///
/// ```
/// use folio_app::testing::in_memory_services;
/// use folio_app::{AppConfig, FolioApp};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let (services, _handles) = in_memory_services();
/// let app = FolioApp::new(AppConfig::default(), services);
///
/// let transition = app.start().await;
/// assert!(transition.completed());
/// assert_eq!(app.router().current_location().await.path, "/portfolio");
/// # });
/// ```
pub struct FolioApp {
    config: AppConfig,
    bus: Arc<EventBus>,
    router: Arc<Router>,
}

impl FolioApp {
    /// Assembles the shell without an error observer.
    #[must_use]
    pub fn new(config: AppConfig, services: AppServices) -> Self {
        Self::with_observer(config, services, None)
    }

    /// Assembles the shell, optionally registering the error observer.
    #[must_use]
    pub fn with_observer(
        config: AppConfig,
        services: AppServices,
        observer: Option<ErrorObserver>,
    ) -> Self {
        let bus = Arc::new(EventBus::new());
        let gate = PermissionGate::new(
            Arc::clone(&services.entitlements),
            Arc::clone(&services.dialogs),
        );
        let table = routes::route_table(&services);

        let mut builder = Router::builder(table, Arc::clone(&bus), gate)
            .with_redirect_limit(config.redirect_limit);
        if let Some(observer) = observer {
            builder = builder.with_error_observer(observer);
        }
        let router = Arc::new(builder.build());

        info!(default_route = %config.default_route, "shell assembled");
        Self {
            config,
            bus,
            router,
        }
    }

    /// Navigates to the configured default route.
    pub async fn start(&self) -> Transition {
        self.router
            .navigate(Location::path(&self.config.default_route))
            .await
    }

    /// Returns the router handle.
    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Returns the event bus handle.
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// In-memory wiring for tests, examples and demos.
pub mod testing {
    use super::AppServices;
    use crate::services::{
        ClientInfo, InMemoryClientService, InMemoryMarketData, InMemoryOverviewService,
        PortfolioRef,
    };
    use folio_gate::testing::BlockingDialogStub;
    use folio_gate::{DialogOutcome, Entitlements};
    use serde_json::json;
    use std::sync::Arc;

    /// Concrete handles behind [`in_memory_services`], for scripting
    /// plan changes, backend failures and dialog outcomes mid-test.
    pub struct ServiceHandles {
        /// The client/plan double.
        pub client: Arc<InMemoryClientService>,
        /// The overview double.
        pub overview: Arc<InMemoryOverviewService>,
        /// The market data double.
        pub market: Arc<InMemoryMarketData>,
        /// The dialog double (declines everything by default).
        pub dialogs: Arc<BlockingDialogStub>,
    }

    /// Builds a fully seeded in-memory service set: a free-plan user
    /// with one portfolio, its overview, and two quoted tickers.
    #[must_use]
    pub fn in_memory_services() -> (AppServices, ServiceHandles) {
        let client = Arc::new(InMemoryClientService::new(ClientInfo {
            tariff: "free".into(),
            entitlements: Entitlements::none(),
            portfolios: vec![PortfolioRef {
                id: 1,
                name: "Main".into(),
                combined: true,
            }],
        }));
        let overview =
            Arc::new(InMemoryOverviewService::new().with_overview(1, json!({"total": 1000})));
        let market = Arc::new(
            InMemoryMarketData::new()
                .with_quote("IBM", json!({"price": 182.5}))
                .with_quote("MSFT", json!({"price": 410.0})),
        );
        let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));

        let services = AppServices {
            client: Arc::clone(&client) as _,
            entitlements: Arc::clone(&client) as _,
            dialogs: Arc::clone(&dialogs) as _,
            overview: Arc::clone(&overview) as _,
            market: Arc::clone(&market) as _,
        };
        let handles = ServiceHandles {
            client,
            overview,
            market,
            dialogs,
        };
        (services, handles)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::in_memory_services;
    use super::*;

    #[tokio::test]
    async fn start_lands_on_default_route() {
        let (services, _handles) = in_memory_services();
        let app = FolioApp::new(AppConfig::default(), services);

        let transition = app.start().await;

        assert!(transition.completed());
        assert_eq!(app.router().active_route().await.as_deref(), Some("portfolio"));
    }

    #[tokio::test]
    async fn configured_default_route_is_honored() {
        let (services, _handles) = in_memory_services();
        let config = AppConfig {
            default_route: "/trades".into(),
            ..AppConfig::default()
        };
        let app = FolioApp::new(config, services);

        let transition = app.start().await;

        assert!(transition.completed());
        assert_eq!(app.router().active_route().await.as_deref(), Some("trades"));
    }
}
