//! Application layer of the folio client shell.
//!
//! Everything above the navigation core lives here: the page
//! components of the portfolio tracker, the narrow contracts to its
//! backend services, the declarative route table, configuration and
//! logging.
//!
//! # Assembly
//!
//! ```text
//! AppConfig ──┐
//!             ▼
//!        ┌─────────┐    route_table()    ┌────────────┐
//!        │ FolioApp│ ──────────────────► │   Router   │
//!        └─────────┘                     └────────────┘
//!             │ owns                        ▲       ▲
//!             ▼                             │       │
//!         EventBus ◄── pages subscribe ─────┘  PermissionGate
//!                                                   ▲
//!                               ClientService ──────┘
//!                               (entitlement snapshots)
//! ```
//!
//! # Contents
//!
//! - [`FolioApp`], [`AppServices`]: wiring
//! - [`AppConfig`], [`ApiConfig`], [`ConfigError`]: configuration
//! - [`pages`]: page components and their preload guards
//! - [`services`]: backend contracts and in-memory doubles
//! - [`route_table`]: the application's navigation tree
//! - [`init_logging`]: tracing setup
//! - [`testing`]: seeded in-memory wiring for tests

mod app;
mod config;
mod logging;
mod routes;

pub mod pages;
pub mod services;

pub use app::testing;
pub use app::{AppServices, FolioApp};
pub use config::{ApiConfig, AppConfig, ConfigError};
pub use logging::init_logging;
pub use routes::route_table;
