//! Event system for the folio client shell.
//!
//! This crate provides the cross-component notification bus: pages and
//! dialogs publish facts ("a trade was created") without referencing
//! the components that care, and subscribers react without referencing
//! the publisher.
//!
//! # Architecture
//!
//! ```text
//! AddTradeDialog ──publish(TradeCreated)──► EventBus
//!                                             │ (registration order)
//!                          ┌──────────────────┼──────────────────┐
//!                          ▼                  ▼                  ▼
//!                   PortfolioPage      AssetQuotesPage      TradesPage
//!                   (reload totals)    (reload quotes)      (reload list)
//! ```
//!
//! Subscription lifetime is tied to page lifetime through the owner id:
//! the lifecycle binder in `folio-nav` registers a page's declared
//! subscriptions at construction and removes them all at destruction.
//!
//! # Contents
//!
//! - [`EventBus`]: the registry and dispatcher
//! - [`EventKey`]: well-known and custom event identifiers
//! - [`EventHandler`], [`ErrorSink`]: callback aliases
//! - [`EventError`]: handler failure report

mod bus;
mod error;
mod key;

pub use bus::{ErrorSink, EventBus, EventHandler};
pub use error::EventError;
pub use key::EventKey;
