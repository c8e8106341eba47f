//! Combined portfolio page.
//!
//! The aggregated view over every portfolio flagged `combined`. The
//! route carries `Permission::CombinedPortfolio`, so the permission
//! gate runs before this page's preload guard ever sees a transition.

use crate::services::{ClientService, OverviewService};
use folio_event::EventKey;
use folio_nav::{Disposition, EventBinding, Guard, Page};
use folio_types::{Location, PageInstanceId};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Currency the combined view renders in by default.
const DEFAULT_VIEW_CURRENCY: &str = "RUB";

/// The combined portfolio page.
pub struct CombinedPortfolioPage {
    id: PageInstanceId,
    overview: Arc<Mutex<Option<Value>>>,
    view_currency: Mutex<String>,
    stale: Arc<AtomicBool>,
}

impl CombinedPortfolioPage {
    /// Creates an empty page; the preload guard fills it on mount.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PageInstanceId::new(),
            overview: Arc::new(Mutex::new(None)),
            view_currency: Mutex::new(DEFAULT_VIEW_CURRENCY.to_string()),
            stale: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the aggregated overview, if loaded.
    #[must_use]
    pub fn overview(&self) -> Option<Value> {
        self.overview.lock().clone()
    }

    /// Returns the current view currency.
    #[must_use]
    pub fn view_currency(&self) -> String {
        self.view_currency.lock().clone()
    }

    /// Returns `true` when published events invalidated the view.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    fn install(&self, overview: Value) {
        *self.overview.lock() = Some(overview);
        self.stale.store(false, Ordering::SeqCst);
    }
}

impl Default for CombinedPortfolioPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for CombinedPortfolioPage {
    fn id(&self) -> PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        "combined-portfolio"
    }

    fn subscriptions(&self) -> Vec<EventBinding> {
        let stale = Arc::clone(&self.stale);
        vec![EventBinding::new(EventKey::TradeCreated, move |_payload| {
            stale.store(true, Ordering::SeqCst);
            Ok(())
        })]
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Entering guard: aggregates the combined portfolios' overview.
///
/// Unlike the single-portfolio preload, any service failure blocks the
/// navigation: an empty combined view is indistinguishable from a
/// wrong one, so the page is never mounted without data.
pub struct PreloadCombined {
    client: Arc<dyn ClientService>,
    service: Arc<dyn OverviewService>,
}

impl PreloadCombined {
    /// Creates the guard over its two services.
    #[must_use]
    pub fn new(client: Arc<dyn ClientService>, service: Arc<dyn OverviewService>) -> Self {
        Self { client, service }
    }
}

#[async_trait::async_trait]
impl Guard for PreloadCombined {
    fn name(&self) -> &str {
        "preload-combined"
    }

    async fn check(&self, _to: &Location, _from: &Location) -> Disposition {
        let info = match self.client.client_info().await {
            Ok(info) => info,
            Err(err) => return Disposition::fail(err.to_string()),
        };
        let ids = info.combined_ids();

        match self
            .service
            .combined_overview(&ids, DEFAULT_VIEW_CURRENCY)
            .await
        {
            Ok(overview) => Disposition::continue_with(move |page| {
                if let Some(page) = page.as_any_mut().downcast_mut::<CombinedPortfolioPage>() {
                    page.install(overview);
                }
            }),
            Err(err) => Disposition::fail(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        ClientInfo, InMemoryClientService, InMemoryOverviewService, PortfolioRef,
    };
    use folio_gate::Entitlements;
    use folio_types::Permission;
    use serde_json::json;

    fn client() -> Arc<InMemoryClientService> {
        Arc::new(InMemoryClientService::new(ClientInfo {
            tariff: "pro".into(),
            entitlements: Entitlements::of([Permission::CombinedPortfolio]),
            portfolios: vec![
                PortfolioRef {
                    id: 1,
                    name: "IIS".into(),
                    combined: true,
                },
                PortfolioRef {
                    id: 2,
                    name: "Broker".into(),
                    combined: true,
                },
            ],
        }))
    }

    #[tokio::test]
    async fn preload_aggregates_combined_portfolios() {
        let service = Arc::new(
            InMemoryOverviewService::new()
                .with_overview(1, json!({"total": 100}))
                .with_overview(2, json!({"total": 200})),
        );
        let guard = PreloadCombined::new(client(), service);

        let disposition = guard
            .check(&Location::path("/combined-portfolio"), &Location::path("/"))
            .await;
        let Disposition::ContinueWith(callback) = disposition else {
            panic!("expected ContinueWith");
        };

        let mut page = CombinedPortfolioPage::new();
        callback(&mut page);

        let overview = page.overview().unwrap();
        assert_eq!(overview["currency"], "RUB");
        assert_eq!(overview["portfolios"].as_array().unwrap().len(), 2);
        assert_eq!(page.view_currency(), "RUB");
    }

    #[tokio::test]
    async fn preload_fails_when_backend_is_down() {
        let service = Arc::new(InMemoryOverviewService::new());
        service.set_unavailable(true);
        let guard = PreloadCombined::new(client(), service);

        let disposition = guard
            .check(&Location::path("/combined-portfolio"), &Location::path("/"))
            .await;
        assert!(matches!(disposition, Disposition::Fail { .. }));
    }
}
