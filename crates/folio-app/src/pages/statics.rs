//! Presentation-only pages.
//!
//! Settings, profile, tariffs and the other purely visual sections
//! need no guards and no subscriptions; one generic page type serves
//! them all, keeping the route table honest about which sections carry
//! real behavior.

use folio_nav::Page;
use folio_types::{Location, PageInstanceId};

/// A page with no hooks: template glue only.
pub struct StaticPage {
    id: PageInstanceId,
    route_name: String,
    location: Location,
}

impl StaticPage {
    /// Creates the page for a route, keeping its resolved location
    /// (parameters included) for the template layer.
    #[must_use]
    pub fn new(route_name: &str, location: Location) -> Self {
        Self {
            id: PageInstanceId::new(),
            route_name: route_name.to_string(),
            location,
        }
    }

    /// Returns the location the page was mounted for.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl Page for StaticPage {
    fn id(&self) -> PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        &self.route_name
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
