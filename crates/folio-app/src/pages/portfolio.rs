//! Portfolio overview page.
//!
//! The default landing page. Its overview is preloaded by a route-level
//! entering guard and handed to the instance through a mount callback;
//! afterwards the page goes stale whenever a trade lands or the active
//! portfolio changes, and the render layer calls [`refresh`] to catch
//! up.
//!
//! [`refresh`]: PortfolioPage::refresh

use crate::services::{ClientService, OverviewService, ServiceError};
use folio_event::EventKey;
use folio_nav::{Disposition, EventBinding, Guard, Page};
use folio_types::{Location, PageInstanceId};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// The portfolio overview page.
pub struct PortfolioPage {
    id: PageInstanceId,
    portfolio_id: Mutex<Option<u64>>,
    overview: Arc<Mutex<Option<Value>>>,
    stale: Arc<AtomicBool>,
    service: Arc<dyn OverviewService>,
}

impl PortfolioPage {
    /// Creates an empty page; the preload guard fills it on mount.
    #[must_use]
    pub fn new(service: Arc<dyn OverviewService>) -> Self {
        Self {
            id: PageInstanceId::new(),
            portfolio_id: Mutex::new(None),
            overview: Arc::new(Mutex::new(None)),
            stale: Arc::new(AtomicBool::new(false)),
            service,
        }
    }

    /// Returns the loaded overview, if any.
    #[must_use]
    pub fn overview(&self) -> Option<Value> {
        self.overview.lock().clone()
    }

    /// Returns `true` when published events invalidated the overview.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Reloads the overview from the service and clears staleness.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        let Some(portfolio_id) = *self.portfolio_id.lock() else {
            return Ok(());
        };
        let overview = self.service.portfolio_overview(portfolio_id).await?;
        *self.overview.lock() = Some(overview);
        self.stale.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn install(&self, portfolio_id: Option<u64>, overview: Option<Value>) {
        *self.portfolio_id.lock() = portfolio_id;
        *self.overview.lock() = overview;
        self.stale.store(false, Ordering::SeqCst);
    }
}

impl Page for PortfolioPage {
    fn id(&self) -> PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        "portfolio"
    }

    fn subscriptions(&self) -> Vec<EventBinding> {
        let on_trade = Arc::clone(&self.stale);
        let on_switch = Arc::clone(&self.stale);
        vec![
            EventBinding::new(EventKey::TradeCreated, move |_payload| {
                on_trade.store(true, Ordering::SeqCst);
                Ok(())
            }),
            EventBinding::new(EventKey::PortfolioSwitched, move |_payload| {
                on_switch.store(true, Ordering::SeqCst);
                Ok(())
            }),
        ]
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Entering guard: preloads the first portfolio's overview.
///
/// A user without portfolios still gets the page (empty state); only a
/// backend failure blocks the navigation.
pub struct PreloadPortfolio {
    client: Arc<dyn ClientService>,
    service: Arc<dyn OverviewService>,
}

impl PreloadPortfolio {
    /// Creates the guard over its two services.
    #[must_use]
    pub fn new(client: Arc<dyn ClientService>, service: Arc<dyn OverviewService>) -> Self {
        Self { client, service }
    }
}

#[async_trait::async_trait]
impl Guard for PreloadPortfolio {
    fn name(&self) -> &str {
        "preload-portfolio"
    }

    async fn check(&self, _to: &Location, _from: &Location) -> Disposition {
        let info = match self.client.client_info().await {
            Ok(info) => info,
            Err(err) => return Disposition::fail(err.to_string()),
        };
        let Some(portfolio_id) = info.portfolios.first().map(|p| p.id) else {
            debug!("no portfolios yet, mounting empty page");
            return Disposition::Continue;
        };

        match self.service.portfolio_overview(portfolio_id).await {
            Ok(overview) => Disposition::continue_with(move |page| {
                if let Some(page) = page.as_any_mut().downcast_mut::<PortfolioPage>() {
                    page.install(Some(portfolio_id), Some(overview));
                }
            }),
            // An un-synced portfolio has no overview yet; mount empty.
            Err(ServiceError::NotFound(_)) => {
                Disposition::continue_with(move |page| {
                    if let Some(page) = page.as_any_mut().downcast_mut::<PortfolioPage>() {
                        page.install(Some(portfolio_id), None);
                    }
                })
            }
            Err(err) => Disposition::fail(err.to_string()),
        }
    }
}
