//! Navigation target addresses.
//!
//! A [`Location`] is the opaque value the router navigates to: a path,
//! an optional symbolic route name, and a map of string parameters.
//! Locations are plain data; resolving one against the route table is
//! the router's job.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target address for a navigation attempt.
///
/// Two locations are equal iff path, name and parameters are all equal.
/// Parameters use a [`BTreeMap`] so equality and iteration order are
/// deterministic.
///
/// # Building Locations
///
/// ```
/// use folio_types::Location;
///
/// // By path, with an extracted parameter
/// let by_path = Location::path("/share-info/IBM");
///
/// // By symbolic name
/// let by_name = Location::named("share-info").with_param("ticker", "IBM");
///
/// assert_eq!(by_name.param("ticker"), Some("IBM"));
/// assert_ne!(by_path, by_name);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Raw path (e.g. `/share-info/IBM`). May be empty for name-only targets.
    pub path: String,
    /// Symbolic route name (e.g. `share-info`), if known.
    pub name: Option<String>,
    /// Route parameters (e.g. `ticker -> IBM`).
    pub params: BTreeMap<String, String>,
}

impl Location {
    /// Creates a location from a raw path.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_types::Location;
    ///
    /// let loc = Location::path("/portfolio");
    /// assert_eq!(loc.path, "/portfolio");
    /// assert!(loc.name.is_none());
    /// ```
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            params: BTreeMap::new(),
        }
    }

    /// Creates a location from a symbolic route name.
    ///
    /// The path is left empty; the router fills it in when the name
    /// resolves against the route table.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            name: Some(name.into()),
            params: BTreeMap::new(),
        }
    }

    /// Returns a copy with the given symbolic name set.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns a copy with one parameter added.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the parameter value for `key`, if present.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns `true` if this location targets the given route name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Splits the path into non-empty segments.
    ///
    /// ```
    /// use folio_types::Location;
    ///
    /// let loc = Location::path("/bond-info/RU000A0JX0J2");
    /// assert_eq!(loc.segments(), vec!["bond-info", "RU000A0JX0J2"]);
    /// ```
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) if self.path.is_empty() => write!(f, "[{}]", name),
            Some(name) => write!(f, "{} [{}]", self.path, name),
            None => write!(f, "{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_covers_all_fields() {
        let a = Location::path("/trades").with_name("trades");
        let b = Location::path("/trades").with_name("trades");
        assert_eq!(a, b);

        let c = b.clone().with_param("page", "2");
        assert_ne!(a, c);
    }

    #[test]
    fn param_lookup() {
        let loc = Location::named("share-info").with_param("ticker", "IBM");
        assert_eq!(loc.param("ticker"), Some("IBM"));
        assert_eq!(loc.param("isin"), None);
    }

    #[test]
    fn named_has_empty_path() {
        let loc = Location::named("portfolio");
        assert!(loc.path.is_empty());
        assert!(loc.is_named("portfolio"));
        assert!(!loc.is_named("trades"));
    }

    #[test]
    fn segments_skip_empty() {
        let loc = Location::path("/share-info/IBM/");
        assert_eq!(loc.segments(), vec!["share-info", "IBM"]);
        assert!(Location::path("/").segments().is_empty());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Location::path("/trades").to_string(), "/trades");
        assert_eq!(Location::named("trades").to_string(), "[trades]");
        assert_eq!(
            Location::path("/trades").with_name("trades").to_string(),
            "/trades [trades]"
        );
    }

    #[test]
    fn location_roundtrip_serde() {
        let loc = Location::path("/bond-info/X").with_name("bond-info").with_param("isin", "X");
        let json = serde_json::to_string(&loc).unwrap();
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, back);
    }
}
