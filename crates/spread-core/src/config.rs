//! Configuration loading and typed config structures for the event spread
//! service.
//!
//! The canonical configuration lives in `event-spread.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure and a
//! loader that reads and validates the file. Every field has a default, so
//! an empty file (or no file at all) yields a working service.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use spread_types::SpreadType;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `event-spread.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Listen address for the HTTP transport.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Query engine limits.
    #[serde(default)]
    pub query: QueryConfig,

    /// Spread handlers registered at startup.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listen address:
    /// - `EVENT_SPREAD_HOST` overrides `server.host`
    /// - `EVENT_SPREAD_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        Ok(config)
    }
}

/// Listen address for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Override the listen address with environment variables when set.
    ///
    /// An unparseable `EVENT_SPREAD_PORT` is ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("EVENT_SPREAD_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("EVENT_SPREAD_PORT") {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(e) => {
                    tracing::warn!(value = %val, error = %e, "ignoring invalid EVENT_SPREAD_PORT");
                }
            }
        }
    }

    /// `host:port` string suitable for socket address parsing.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Query engine limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    /// Deadline for a single spread query in milliseconds (0 = unlimited).
    #[serde(default)]
    pub timeout_ms: u64,
}

impl QueryConfig {
    /// The deadline as a [`Duration`], or `None` when unlimited.
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}

/// Spread handlers registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchConfig {
    /// Spread types whose built-in handler is enabled.
    #[serde(default = "default_spread_types")]
    pub spread_types: Vec<SpreadType>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            spread_types: default_spread_types(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "localhost".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_spread_types() -> Vec<SpreadType> {
    vec![SpreadType::InstantGlobal]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.query.timeout().is_none());
        assert_eq!(config.dispatch.spread_types, vec![SpreadType::InstantGlobal]);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "0.0.0.0"
  port: 9090

logging:
  level: "debug"
  json: true

query:
  timeout_ms: 250

dispatch:
  spread_types:
    - INSTANT_GLOBAL
"#;

        let config = ServiceConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.query.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.dispatch.spread_types, vec![SpreadType::InstantGlobal]);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "query:\n  timeout_ms: 5\n";
        let config = ServiceConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Timeout is overridden
        assert_eq!(config.query.timeout_ms, 5);
        // Everything else uses defaults
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.dispatch.spread_types.len(), 1);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = ServiceConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn empty_dispatch_list_is_allowed() {
        let config = ServiceConfig::parse("dispatch:\n  spread_types: []\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert!(config.dispatch.spread_types.is_empty());
    }

    #[test]
    fn unknown_spread_type_is_rejected() {
        let config = ServiceConfig::parse("dispatch:\n  spread_types: [RIPPLE]\n");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("event-spread.yaml");
        if path.exists() {
            let config = ServiceConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
