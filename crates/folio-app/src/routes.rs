//! Route configuration.
//!
//! The single place the application's sections are declared, mirroring
//! the shape of the backend's navigation tree:
//!
//! | Route | Path | Guards |
//! |-------|------|--------|
//! | `portfolio` | `/portfolio` | preload overview |
//! | `trades` | `/trades` | leaving: unsaved-draft prompt |
//! | `combined-portfolio` | `/combined-portfolio` | permission + preload |
//! | `share-info` | `/share-info/:ticker` | preload quotes, update guard |
//! | `bond-info` | `/bond-info/:isin` | - |
//! | `portfolio-settings` | `/portfolio-settings` | - |
//! | `import-export` | `/import-export` | - |
//! | `profile` | `/profile` | - |
//! | `tariffs` | `/tariffs` | - |
//! | `promo-codes` | `/promo-codes` | - |
//! | `notifications` | `/notifications` | permission |
//! | `fallback` | `*` | redirect → `/portfolio` |

use crate::app::AppServices;
use crate::pages::{
    AssetQuotesPage, CombinedPortfolioPage, PortfolioPage, PreloadCombined, PreloadPortfolio,
    PreloadQuotes, StaticPage, TradesPage,
};
use folio_nav::{Route, RouteTable};
use folio_types::{Location, Permission};
use std::sync::Arc;

/// Builds a presentation-only route.
fn static_route(name: &'static str, pattern: &str) -> Route {
    Route::new(name, pattern, move |loc| {
        Box::new(StaticPage::new(name, loc.clone()))
    })
}

/// Builds the application route table over the injected services.
#[must_use]
pub fn route_table(services: &AppServices) -> RouteTable {
    let portfolio_factory = {
        let overview = Arc::clone(&services.overview);
        move |_loc: &Location| -> Box<dyn folio_nav::Page> {
            Box::new(PortfolioPage::new(Arc::clone(&overview)))
        }
    };
    let trades_factory = {
        let dialogs = Arc::clone(&services.dialogs);
        move |_loc: &Location| -> Box<dyn folio_nav::Page> {
            Box::new(TradesPage::new(Arc::clone(&dialogs)))
        }
    };
    let quotes_factory = {
        let market = Arc::clone(&services.market);
        move |_loc: &Location| -> Box<dyn folio_nav::Page> {
            Box::new(AssetQuotesPage::new(Arc::clone(&market)))
        }
    };

    RouteTable::new()
        .with_route(
            Route::new("portfolio", "/portfolio", portfolio_factory).with_entering_guard(
                Arc::new(PreloadPortfolio::new(
                    Arc::clone(&services.client),
                    Arc::clone(&services.overview),
                )),
            ),
        )
        .with_route(Route::new("trades", "/trades", trades_factory))
        .with_route(
            Route::new("combined-portfolio", "/combined-portfolio", |_loc| {
                Box::new(CombinedPortfolioPage::new())
            })
            .with_permission(Permission::CombinedPortfolio)
            .with_entering_guard(Arc::new(PreloadCombined::new(
                Arc::clone(&services.client),
                Arc::clone(&services.overview),
            ))),
        )
        .with_route(
            Route::new("share-info", "/share-info/:ticker", quotes_factory)
                .with_entering_guard(Arc::new(PreloadQuotes::new(Arc::clone(&services.market)))),
        )
        .with_route(static_route("bond-info", "/bond-info/:isin"))
        .with_route(static_route("portfolio-settings", "/portfolio-settings"))
        .with_route(static_route("import-export", "/import-export"))
        .with_route(static_route("profile", "/profile"))
        .with_route(static_route("tariffs", "/tariffs"))
        .with_route(static_route("promo-codes", "/promo-codes"))
        .with_route(
            static_route("notifications", "/notifications")
                .with_permission(Permission::Notifications),
        )
        .with_route(Route::redirect(
            "fallback",
            "*",
            Location::path("/portfolio"),
        ))
}
