//! External collaborators, consumed through narrow contracts.
//!
//! Transport is out of scope: the traits here are the shape of the
//! backend, and the in-memory implementations exist for tests and
//! demos. An HTTP binding would implement the same traits.

mod client;
mod error;
mod market;
mod portfolio;

pub use client::{ClientInfo, ClientService, InMemoryClientService, PortfolioRef};
pub use error::ServiceError;
pub use market::{InMemoryMarketData, MarketDataService};
pub use portfolio::{InMemoryOverviewService, OverviewService};
