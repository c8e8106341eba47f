//! Market data service.
//!
//! Quotes for individual instruments, used by the share-info page to
//! preload and to refresh on ticker changes.

use crate::services::ServiceError;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

/// Instrument quote access.
#[async_trait::async_trait]
pub trait MarketDataService: Send + Sync {
    /// Returns quote data for a ticker.
    async fn quotes(&self, ticker: &str) -> Result<Value, ServiceError>;
}

/// In-memory market data for tests and demos.
pub struct InMemoryMarketData {
    quotes: Mutex<HashMap<String, Value>>,
}

impl InMemoryMarketData {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quotes: Mutex::new(HashMap::new()),
        }
    }

    /// Seeds a quote.
    #[must_use]
    pub fn with_quote(self, ticker: &str, quote: Value) -> Self {
        self.quotes.lock().insert(ticker.to_string(), quote);
        self
    }
}

impl Default for InMemoryMarketData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MarketDataService for InMemoryMarketData {
    async fn quotes(&self, ticker: &str) -> Result<Value, ServiceError> {
        self.quotes
            .lock()
            .get(ticker)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("ticker {}", ticker)))
    }
}
