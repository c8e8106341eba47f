//! Application configuration.
//!
//! Layered loading, highest priority first:
//!
//! ```text
//! 1. Environment variables (FOLIO_*)
//! 2. Config file (folio.toml)
//! 3. Compile-time defaults
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Field | Type |
//! |----------|-------|------|
//! | `FOLIO_DEBUG` | `debug` | bool |
//! | `FOLIO_DEFAULT_ROUTE` | `default_route` | String |
//! | `FOLIO_REDIRECT_LIMIT` | `redirect_limit` | usize |
//! | `FOLIO_API_BASE_URL` | `api.base_url` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! # folio.toml
//! debug = false
//! default_route = "/portfolio"
//! redirect_limit = 10
//!
//! [api]
//! base_url = "https://api.folio.example"
//! ```

use folio_nav::DEFAULT_REDIRECT_LIMIT;
use folio_types::ErrorCode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Backend endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the data services.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.folio.example".to_string(),
        }
    }
}

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Verbose logging.
    pub debug: bool,
    /// Route the shell opens on start.
    pub default_route: String,
    /// Bound on redirect chains per navigation.
    pub redirect_limit: usize,
    /// Backend endpoints.
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_route: "/portfolio".to_string(),
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads from a file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }

    /// Loads the layered configuration: file (if given), then
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies `FOLIO_*` overrides read through `get`.
    ///
    /// Unparseable values are ignored with a warning rather than
    /// failing startup.
    #[must_use]
    pub fn with_env_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = get("FOLIO_DEBUG") {
            match raw.parse() {
                Ok(value) => self.debug = value,
                Err(_) => warn!(%raw, "ignoring unparseable FOLIO_DEBUG"),
            }
        }
        if let Some(route) = get("FOLIO_DEFAULT_ROUTE") {
            self.default_route = route;
        }
        if let Some(raw) = get("FOLIO_REDIRECT_LIMIT") {
            match raw.parse() {
                Ok(value) => self.redirect_limit = value,
                Err(_) => warn!(%raw, "ignoring unparseable FOLIO_REDIRECT_LIMIT"),
            }
        }
        if let Some(url) = get("FOLIO_API_BASE_URL") {
            self.api.base_url = url;
        }
        self
    }
}

/// Configuration loading error.
///
/// # Error Code Convention
///
/// | Error | Code | Recoverable |
/// |-------|------|-------------|
/// | [`ConfigError::Read`] | `CONFIG_READ` | No |
/// | [`ConfigError::Parse`] | `CONFIG_PARSE` | No |
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ",
            Self::Parse(_) => "CONFIG_PARSE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert!(!config.debug);
        assert_eq!(config.default_route, "/portfolio");
        assert_eq!(config.redirect_limit, DEFAULT_REDIRECT_LIMIT);
    }

    #[test]
    fn toml_overrides_defaults_partially() {
        let config = AppConfig::from_toml_str(
            r#"
            default_route = "/trades"

            [api]
            base_url = "https://staging.folio.example"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_route, "/trades");
        assert_eq!(config.api.base_url, "https://staging.folio.example");
        // Unset fields keep their defaults.
        assert_eq!(config.redirect_limit, DEFAULT_REDIRECT_LIMIT);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("redirect_limit = \"many\"").unwrap_err();
        assert_eq!(err.code(), "CONFIG_PARSE");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("FOLIO_DEBUG", "true"),
            ("FOLIO_DEFAULT_ROUTE", "/combined-portfolio"),
            ("FOLIO_REDIRECT_LIMIT", "3"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert!(config.debug);
        assert_eq!(config.default_route, "/combined-portfolio");
        assert_eq!(config.redirect_limit, 3);
    }

    #[test]
    fn unparseable_env_values_are_ignored() {
        let config = AppConfig::default().with_env_overrides(|key| match key {
            "FOLIO_DEBUG" => Some("maybe".to_string()),
            "FOLIO_REDIRECT_LIMIT" => Some("lots".to_string()),
            _ => None,
        });

        assert!(!config.debug);
        assert_eq!(config.redirect_limit, DEFAULT_REDIRECT_LIMIT);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/definitely/not/here/folio.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
