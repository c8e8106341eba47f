//! Client/plan service.
//!
//! Serves the current user's profile: plan entitlements and the list
//! of portfolios. Doubles as the router's [`EntitlementProvider`];
//! the permission gate takes its snapshot from here on every check.

use crate::services::ServiceError;
use folio_gate::{EntitlementProvider, Entitlements};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One portfolio owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRef {
    /// Backend id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Whether the portfolio participates in the combined view.
    pub combined: bool,
}

/// The user profile the shell works with.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Plan name (display only).
    pub tariff: String,
    /// Entitlements of the current plan.
    pub entitlements: Entitlements,
    /// The user's portfolios.
    pub portfolios: Vec<PortfolioRef>,
}

impl ClientInfo {
    /// Ids of the portfolios flagged for the combined view.
    #[must_use]
    pub fn combined_ids(&self) -> Vec<u64> {
        self.portfolios
            .iter()
            .filter(|p| p.combined)
            .map(|p| p.id)
            .collect()
    }
}

/// Client profile access.
#[async_trait::async_trait]
pub trait ClientService: Send + Sync {
    /// Returns the current profile.
    async fn client_info(&self) -> Result<ClientInfo, ServiceError>;
}

/// In-memory client service for tests and demos.
///
/// The profile can be swapped mid-run to model plan changes.
pub struct InMemoryClientService {
    info: Mutex<ClientInfo>,
}

impl InMemoryClientService {
    /// Creates the service with the given profile.
    #[must_use]
    pub fn new(info: ClientInfo) -> Self {
        Self {
            info: Mutex::new(info),
        }
    }

    /// Replaces the profile.
    pub fn replace(&self, info: ClientInfo) {
        *self.info.lock() = info;
    }
}

#[async_trait::async_trait]
impl ClientService for InMemoryClientService {
    async fn client_info(&self) -> Result<ClientInfo, ServiceError> {
        Ok(self.info.lock().clone())
    }
}

impl EntitlementProvider for InMemoryClientService {
    fn current_entitlements(&self) -> Entitlements {
        self.info.lock().entitlements.clone()
    }
}
