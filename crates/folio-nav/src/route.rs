//! Route definitions and the route table.
//!
//! A [`Route`] couples a path pattern with the recipe for its page:
//! a factory, route-level entering guards, an optional required
//! permission, and optionally a redirect target instead of a page
//! (used by the wildcard fallback). The [`RouteTable`] resolves a
//! requested [`Location`], by symbolic name or by path, to a route
//! plus a normalized location with extracted parameters.
//!
//! # Patterns
//!
//! | Pattern | Matches | Params |
//! |---------|---------|--------|
//! | `/portfolio` | exactly `/portfolio` | - |
//! | `/share-info/:ticker` | `/share-info/IBM` | `ticker = IBM` |
//! | `*` | anything (fallback) | - |
//!
//! Routes are tried in declaration order; declare the wildcard last.

use crate::{Guard, Page};
use folio_types::{Location, Permission};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Constructor for a route's page.
///
/// Receives the resolved target location so the instance knows its
/// parameters from birth.
pub type PageFactory = Arc<dyn Fn(&Location) -> Box<dyn Page> + Send + Sync>;

/// One entry of the route table.
pub struct Route {
    name: String,
    pattern: String,
    factory: Option<PageFactory>,
    entering: Vec<Arc<dyn Guard>>,
    required_permission: Option<Permission>,
    redirect: Option<Location>,
}

impl Route {
    /// Creates a page-backed route.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folio_nav::Route;
    /// # use folio_nav::Page;
    /// # fn make_page(_loc: &folio_types::Location) -> Box<dyn Page> { unimplemented!() }
    ///
    /// let route = Route::new("share-info", "/share-info/:ticker", make_page);
    /// assert_eq!(route.name(), "share-info");
    /// ```
    #[must_use]
    pub fn new<F>(name: impl Into<String>, pattern: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Location) -> Box<dyn Page> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            factory: Some(Arc::new(factory)),
            entering: Vec::new(),
            required_permission: None,
            redirect: None,
        }
    }

    /// Creates a redirect-only route (no page).
    ///
    /// Matching it counts as one redirect hop.
    #[must_use]
    pub fn redirect(
        name: impl Into<String>,
        pattern: impl Into<String>,
        target: Location,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            factory: None,
            entering: Vec::new(),
            required_permission: None,
            redirect: Some(target),
        }
    }

    /// Appends a route-level entering guard (declaration order kept).
    #[must_use]
    pub fn with_entering_guard(mut self, guard: Arc<dyn Guard>) -> Self {
        self.entering.push(guard);
        self
    }

    /// Requires an entitlement to enter this route.
    #[must_use]
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    /// Returns the route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the entering guards in declaration order.
    #[must_use]
    pub fn entering_guards(&self) -> &[Arc<dyn Guard>] {
        &self.entering
    }

    /// Returns the required permission, if any.
    #[must_use]
    pub fn required_permission(&self) -> Option<Permission> {
        self.required_permission
    }

    /// Returns the redirect target, if this is a redirect-only route.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&Location> {
        self.redirect.as_ref()
    }

    /// Constructs the page for `location`.
    ///
    /// Returns `None` for redirect-only routes.
    #[must_use]
    pub fn instantiate(&self, location: &Location) -> Option<Box<dyn Page>> {
        self.factory.as_ref().map(|f| f(location))
    }

    /// Builds the concrete path for this route from `params`.
    ///
    /// Returns `None` when a `:param` segment has no value, or for the
    /// wildcard pattern (which has no concrete path of its own).
    fn build_path(&self, params: &BTreeMap<String, String>) -> Option<String> {
        if self.pattern == "*" {
            return None;
        }
        let mut path = String::new();
        for segment in self.pattern.split('/').filter(|s| !s.is_empty()) {
            path.push('/');
            match segment.strip_prefix(':') {
                Some(key) => path.push_str(params.get(key)?),
                None => path.push_str(segment),
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}

/// Outcome of resolving a location against the table.
pub struct ResolvedRoute<'a> {
    /// The matched route.
    pub route: &'a Route,
    /// The normalized target: name filled, path built, params extracted.
    pub location: Location,
}

/// Ordered route table.
///
/// # Example
///
/// ```
/// use folio_nav::{Route, RouteTable};
/// use folio_types::Location;
///
/// let table = RouteTable::new()
///     .with_route(Route::redirect("fallback", "*", Location::path("/portfolio")));
///
/// let resolved = table.resolve(&Location::path("/no-such-page")).unwrap();
/// assert_eq!(resolved.route.name(), "fallback");
/// ```
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. Order matters: first match wins.
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Looks up a route by name.
    #[must_use]
    pub fn route_named(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolves a requested location to a route and normalized target.
    ///
    /// A symbolic name takes precedence over the path; path matching
    /// walks the table in declaration order. Returns `None` when the
    /// name is unknown, a named route misses a required `:param`, or no
    /// pattern matches the path.
    #[must_use]
    pub fn resolve(&self, target: &Location) -> Option<ResolvedRoute<'_>> {
        if let Some(name) = &target.name {
            let route = self.route_named(name)?;
            let path = route
                .build_path(&target.params)
                .unwrap_or_else(|| target.path.clone());
            debug!(route = %route.name, %path, "resolved by name");
            return Some(ResolvedRoute {
                route,
                location: Location {
                    path,
                    name: Some(route.name.clone()),
                    params: target.params.clone(),
                },
            });
        }

        for route in &self.routes {
            if let Some(extracted) = match_pattern(&route.pattern, &target.path) {
                let mut params = target.params.clone();
                params.extend(extracted);
                debug!(route = %route.name, path = %target.path, "resolved by path");
                return Some(ResolvedRoute {
                    route,
                    location: Location {
                        path: target.path.clone(),
                        name: Some(route.name.clone()),
                        params,
                    },
                });
            }
        }
        None
    }
}

/// Matches `path` against `pattern`, extracting `:param` segments.
fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    if pattern == "*" {
        return Some(BTreeMap::new());
    }

    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        match expected.strip_prefix(':') {
            Some(key) => {
                params.insert(key.to_string(), (*actual).to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestPage;

    fn table() -> RouteTable {
        RouteTable::new()
            .with_route(Route::new("portfolio", "/portfolio", |_loc| {
                Box::new(TestPage::new("portfolio"))
            }))
            .with_route(Route::new("share-info", "/share-info/:ticker", |_loc| {
                Box::new(TestPage::new("share-info"))
            }))
            .with_route(Route::redirect(
                "fallback",
                "*",
                Location::path("/portfolio"),
            ))
    }

    #[test]
    fn static_path_resolves() {
        let table = table();
        let resolved = table.resolve(&Location::path("/portfolio")).unwrap();
        assert_eq!(resolved.route.name(), "portfolio");
        assert_eq!(resolved.location.name.as_deref(), Some("portfolio"));
    }

    #[test]
    fn param_segment_is_extracted() {
        let table = table();
        let resolved = table.resolve(&Location::path("/share-info/IBM")).unwrap();
        assert_eq!(resolved.route.name(), "share-info");
        assert_eq!(resolved.location.param("ticker"), Some("IBM"));
    }

    #[test]
    fn name_resolution_builds_path() {
        let table = table();
        let target = Location::named("share-info").with_param("ticker", "MSFT");
        let resolved = table.resolve(&target).unwrap();
        assert_eq!(resolved.location.path, "/share-info/MSFT");
    }

    #[test]
    fn name_resolution_missing_param_falls_back_to_raw_path() {
        let table = table();
        // Named target with no ticker cannot build a concrete path; the
        // (empty) raw path is kept and the route still resolves.
        let resolved = table.resolve(&Location::named("share-info")).unwrap();
        assert_eq!(resolved.route.name(), "share-info");
        assert!(resolved.location.path.is_empty());
    }

    #[test]
    fn unknown_name_is_unresolved() {
        let table = table();
        assert!(table.resolve(&Location::named("no-such-route")).is_none());
    }

    #[test]
    fn wildcard_catches_unknown_paths() {
        let table = table();
        let resolved = table.resolve(&Location::path("/mystery")).unwrap();
        assert_eq!(resolved.route.name(), "fallback");
        assert_eq!(
            resolved.route.redirect_target().unwrap().path,
            "/portfolio"
        );
    }

    #[test]
    fn declaration_order_decides_between_overlaps() {
        let first_wins = RouteTable::new()
            .with_route(Route::new("specific", "/a/:x", |_| {
                Box::new(TestPage::new("specific"))
            }))
            .with_route(Route::new("late", "/a/b", |_| Box::new(TestPage::new("late"))));

        let resolved = first_wins.resolve(&Location::path("/a/b")).unwrap();
        assert_eq!(resolved.route.name(), "specific");
    }

    #[test]
    fn segment_count_must_match() {
        assert!(match_pattern("/a/:x", "/a").is_none());
        assert!(match_pattern("/a/:x", "/a/b/c").is_none());
        assert!(match_pattern("/a/:x", "/a/b").is_some());
    }

    #[test]
    fn redirect_route_has_no_page() {
        let route = Route::redirect("fallback", "*", Location::path("/portfolio"));
        assert!(route.instantiate(&Location::path("/x")).is_none());
    }
}
