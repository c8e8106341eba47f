//! Page components.
//!
//! Each page declares its hooks statically: subscriptions as data,
//! guard capabilities as trait implementations, preloads as route-level
//! entering guards. The router and binder do the wiring.

mod combined;
mod portfolio;
mod quotes;
mod statics;
mod trades;

pub use combined::{CombinedPortfolioPage, PreloadCombined};
pub use portfolio::{PortfolioPage, PreloadPortfolio};
pub use quotes::{AssetQuotesPage, PreloadQuotes};
pub use statics::StaticPage;
pub use trades::TradesPage;
