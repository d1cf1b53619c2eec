//! Configuration management.
//!
//! Settings come from three layers, lowest precedence first: built-in defaults,
//! an optional config file, and `GOOGLE_BOOKS_API_*` environment variables.
//! Builder methods on [`ClientConfig`] override all of them.
//!
//! | Key    | Environment variable    | Default                                  |
//! |--------|-------------------------|------------------------------------------|
//! | `key`  | `GOOGLE_BOOKS_API_KEY`  | none (required)                          |
//! | `uri`  | `GOOGLE_BOOKS_API_URI`  | `https://www.googleapis.com/books/v1/`   |
//! | `path` | `GOOGLE_BOOKS_API_PATH` | `volumes`                                |

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of the environment variables the client reads
pub const ENV_PREFIX: &str = "GOOGLE_BOOKS_API";

/// Base URI of the public Books API
pub const DEFAULT_BASE_URI: &str = "https://www.googleapis.com/books/v1/";

/// Resource listed when no endpoint is selected
pub const DEFAULT_RESOURCE_PATH: &str = "volumes";

/// Connection settings, fixed once the client is constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key sent with every request
    #[serde(default, rename = "key")]
    pub api_key: Option<String>,

    /// Base URI the resource path is resolved against
    #[serde(default = "default_base_uri", rename = "uri")]
    pub base_uri: Option<String>,

    /// Resource path used until an endpoint is selected
    #[serde(default = "default_resource_path", rename = "path")]
    pub resource_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_uri: default_base_uri(),
            resource_path: default_resource_path(),
        }
    }
}

fn default_base_uri() -> Option<String> {
    Some(DEFAULT_BASE_URI.to_string())
}

fn default_resource_path() -> String {
    DEFAULT_RESOURCE_PATH.to_string()
}

impl ClientConfig {
    /// Default settings with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Read settings from `GOOGLE_BOOKS_API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from a file, with environment variables taking precedence
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        settings.try_deserialize()
    }

    pub(crate) fn from_environment(
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Drop the base URI, including the default one
    pub fn without_base_uri(mut self) -> Self {
        self.base_uri = None;
        self
    }

    pub fn with_resource_path(mut self, resource_path: impl Into<String>) -> Self {
        self.resource_path = resource_path.into();
        self
    }

    /// API key, if set to a non-empty value
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Base URI, if set to a non-empty value
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref().filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.base_uri(), Some(DEFAULT_BASE_URI));
        assert_eq!(config.resource_path, "volumes");
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let config = ClientConfig::new("").with_base_uri("");
        assert_eq!(config.api_key(), None);
        assert_eq!(config.base_uri(), None);
    }

    #[test]
    fn test_without_base_uri() {
        let config = ClientConfig::new("secret").without_base_uri();
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.base_uri(), None);
    }

    #[test]
    fn test_from_environment() {
        let config = ClientConfig::from_environment(environment(&[
            ("GOOGLE_BOOKS_API_KEY", "env-key"),
            ("GOOGLE_BOOKS_API_PATH", "users/7/bookshelves"),
        ]))
        .unwrap();

        assert_eq!(config.api_key(), Some("env-key"));
        assert_eq!(config.base_uri(), Some(DEFAULT_BASE_URI));
        assert_eq!(config.resource_path, "users/7/bookshelves");
    }

    #[test]
    fn test_from_empty_environment() {
        let config = ClientConfig::from_environment(environment(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "key = \"file-key\"").unwrap();
        writeln!(file, "uri = \"http://localhost:8080/books/v1/\"").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.base_uri(), Some("http://localhost:8080/books/v1/"));
        assert_eq!(config.resource_path, "volumes");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ClientConfig::load(Path::new("/nonexistent/books.toml"));
        assert!(result.is_err());
    }
}
