//! Portfolio overview service.
//!
//! HTTP-shaped contract used by entering guards to preload page data.
//! Payloads stay as raw JSON values; shaping them into view models is
//! the page's business.

use crate::services::ServiceError;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

/// Portfolio overview access.
#[async_trait::async_trait]
pub trait OverviewService: Send + Sync {
    /// Returns the overview of one portfolio.
    async fn portfolio_overview(&self, portfolio_id: u64) -> Result<Value, ServiceError>;

    /// Returns the aggregated overview of several portfolios.
    async fn combined_overview(&self, ids: &[u64], currency: &str)
        -> Result<Value, ServiceError>;
}

/// In-memory overview service for tests and demos.
pub struct InMemoryOverviewService {
    overviews: Mutex<HashMap<u64, Value>>,
    unavailable: Mutex<bool>,
}

impl InMemoryOverviewService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overviews: Mutex::new(HashMap::new()),
            unavailable: Mutex::new(false),
        }
    }

    /// Seeds the overview for one portfolio.
    #[must_use]
    pub fn with_overview(self, portfolio_id: u64, overview: Value) -> Self {
        self.overviews.lock().insert(portfolio_id, overview);
        self
    }

    /// Scripts backend availability; `true` makes every call fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock() = unavailable;
    }

    fn check_available(&self) -> Result<(), ServiceError> {
        if *self.unavailable.lock() {
            Err(ServiceError::Unavailable("overview backend down".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryOverviewService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OverviewService for InMemoryOverviewService {
    async fn portfolio_overview(&self, portfolio_id: u64) -> Result<Value, ServiceError> {
        self.check_available()?;
        self.overviews
            .lock()
            .get(&portfolio_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("portfolio {}", portfolio_id)))
    }

    async fn combined_overview(
        &self,
        ids: &[u64],
        currency: &str,
    ) -> Result<Value, ServiceError> {
        self.check_available()?;
        let overviews = self.overviews.lock();
        let parts: Vec<Value> = ids
            .iter()
            .filter_map(|id| overviews.get(id).cloned())
            .collect();
        Ok(serde_json::json!({
            "currency": currency,
            "portfolios": parts,
        }))
    }
}
