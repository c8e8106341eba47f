//! Share info page (`/share-info/:ticker`).
//!
//! Shows quotes for one instrument. Switching tickers reuses the
//! mounted instance through the update guard: the quotes are swapped
//! in place and subscriptions stay put. The page listens for asset and
//! trade events so the quotes list refreshes after edits elsewhere.

use crate::services::{MarketDataService, ServiceError};
use folio_event::EventKey;
use folio_nav::{Disposition, EventBinding, Guard, Page, UpdateGuard};
use folio_types::{Location, PageInstanceId};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// The share info page.
pub struct AssetQuotesPage {
    id: PageInstanceId,
    ticker: Mutex<String>,
    quotes: Mutex<Option<Value>>,
    stale: Arc<AtomicBool>,
    market: Arc<dyn MarketDataService>,
}

impl AssetQuotesPage {
    /// Creates an empty page; the preload guard fills it on mount.
    #[must_use]
    pub fn new(market: Arc<dyn MarketDataService>) -> Self {
        Self {
            id: PageInstanceId::new(),
            ticker: Mutex::new(String::new()),
            quotes: Mutex::new(None),
            stale: Arc::new(AtomicBool::new(false)),
            market,
        }
    }

    /// Returns the displayed ticker.
    #[must_use]
    pub fn ticker(&self) -> String {
        self.ticker.lock().clone()
    }

    /// Returns the loaded quotes, if any.
    #[must_use]
    pub fn quotes(&self) -> Option<Value> {
        self.quotes.lock().clone()
    }

    /// Returns `true` when published events invalidated the quotes.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Reloads quotes for the displayed ticker.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        let ticker = self.ticker();
        if ticker.is_empty() {
            return Ok(());
        }
        let quotes = self.market.quotes(&ticker).await?;
        self.install(ticker, quotes);
        Ok(())
    }

    fn install(&self, ticker: String, quotes: Value) {
        *self.ticker.lock() = ticker;
        *self.quotes.lock() = Some(quotes);
        self.stale.store(false, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl UpdateGuard for AssetQuotesPage {
    async fn before_update(&self, to: &Location, _from: &Location) -> Disposition {
        let Some(ticker) = to.param("ticker") else {
            return Disposition::fail("share-info target without ticker param");
        };

        match self.market.quotes(ticker).await {
            Ok(quotes) => {
                info!(ticker, "switched instrument in place");
                self.install(ticker.to_string(), quotes);
                Disposition::Continue
            }
            // Unknown instrument: stay where we are.
            Err(ServiceError::NotFound(_)) => Disposition::Cancel,
            Err(err) => Disposition::fail(err.to_string()),
        }
    }
}

impl Page for AssetQuotesPage {
    fn id(&self) -> PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        "share-info"
    }

    fn subscriptions(&self) -> Vec<EventBinding> {
        [
            EventKey::AssetCreated,
            EventKey::AssetUpdated,
            EventKey::TradeCreated,
        ]
        .into_iter()
        .map(|key| {
            let stale = Arc::clone(&self.stale);
            EventBinding::new(key, move |_payload| {
                stale.store(true, Ordering::SeqCst);
                Ok(())
            })
        })
        .collect()
    }

    fn as_update_guard(&self) -> Option<&dyn UpdateGuard> {
        Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Entering guard: preloads quotes for the target ticker.
pub struct PreloadQuotes {
    market: Arc<dyn MarketDataService>,
}

impl PreloadQuotes {
    /// Creates the guard over the market data service.
    #[must_use]
    pub fn new(market: Arc<dyn MarketDataService>) -> Self {
        Self { market }
    }
}

#[async_trait::async_trait]
impl Guard for PreloadQuotes {
    fn name(&self) -> &str {
        "preload-quotes"
    }

    async fn check(&self, to: &Location, _from: &Location) -> Disposition {
        let Some(ticker) = to.param("ticker") else {
            return Disposition::fail("share-info target without ticker param");
        };
        let ticker = ticker.to_string();

        match self.market.quotes(&ticker).await {
            Ok(quotes) => Disposition::continue_with(move |page| {
                if let Some(page) = page.as_any_mut().downcast_mut::<AssetQuotesPage>() {
                    page.install(ticker, quotes);
                }
            }),
            // Unknown instrument: stay on the current page.
            Err(ServiceError::NotFound(_)) => Disposition::Cancel,
            Err(err) => Disposition::fail(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryMarketData;
    use serde_json::json;

    fn market() -> Arc<InMemoryMarketData> {
        Arc::new(
            InMemoryMarketData::new()
                .with_quote("IBM", json!({"price": 182.5}))
                .with_quote("MSFT", json!({"price": 410.0})),
        )
    }

    #[tokio::test]
    async fn preload_installs_quotes() {
        let market = market();
        let guard = PreloadQuotes::new(Arc::clone(&market) as _);

        let to = Location::path("/share-info/IBM").with_param("ticker", "IBM");
        let Disposition::ContinueWith(callback) = guard.check(&to, &Location::path("/")).await
        else {
            panic!("expected ContinueWith");
        };

        let mut page = AssetQuotesPage::new(market);
        callback(&mut page);

        assert_eq!(page.ticker(), "IBM");
        assert_eq!(page.quotes().unwrap()["price"], 182.5);
    }

    #[tokio::test]
    async fn preload_of_unknown_ticker_cancels() {
        let guard = PreloadQuotes::new(market());
        let to = Location::path("/share-info/ZZZ").with_param("ticker", "ZZZ");

        assert!(matches!(
            guard.check(&to, &Location::path("/")).await,
            Disposition::Cancel
        ));
    }

    #[tokio::test]
    async fn update_swaps_ticker_in_place() {
        let market = market();
        let page = AssetQuotesPage::new(Arc::clone(&market) as _);
        page.install("IBM".into(), json!({"price": 182.5}));

        let to = Location::path("/share-info/MSFT").with_param("ticker", "MSFT");
        let d = page
            .before_update(&to, &Location::path("/share-info/IBM"))
            .await;

        assert!(matches!(d, Disposition::Continue));
        assert_eq!(page.ticker(), "MSFT");
        assert_eq!(page.quotes().unwrap()["price"], 410.0);
    }

    #[tokio::test]
    async fn update_to_unknown_ticker_keeps_current() {
        let market = market();
        let page = AssetQuotesPage::new(Arc::clone(&market) as _);
        page.install("IBM".into(), json!({"price": 182.5}));

        let to = Location::path("/share-info/ZZZ").with_param("ticker", "ZZZ");
        let d = page
            .before_update(&to, &Location::path("/share-info/IBM"))
            .await;

        assert!(matches!(d, Disposition::Cancel));
        assert_eq!(page.ticker(), "IBM");
    }

    #[tokio::test]
    async fn asset_events_mark_quotes_stale() {
        let page = AssetQuotesPage::new(market());
        let bindings = page.subscriptions();
        assert_eq!(bindings.len(), 3);

        bindings[0].handler.as_ref()(&json!({"id": 42})).unwrap();
        assert!(page.is_stale());
    }
}
