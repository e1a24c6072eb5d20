//! Service configuration.
//!
//! Read from environment variables at startup:
//!
//! - `RECIPE_DATASET`: path to the recipe dataset file (required)
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8002)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)

use std::path::PathBuf;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 8002;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `RECIPE_DATASET` is not set.
    #[error("RECIPE_DATASET is not set")]
    MissingDataset,
    /// `PORT` is not a valid port number.
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
    /// The dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    DatasetUnreadable {
        /// Dataset path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable output for local development.
    Pretty,
}

impl LogFormat {
    /// Parse a log format name. Anything other than "pretty" is JSON.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Dataset file to index at startup.
    pub dataset_path: PathBuf,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dataset_path = lookup("RECIPE_DATASET")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingDataset)?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let log_format = lookup("LOG_FORMAT")
            .map(|s| LogFormat::parse(&s))
            .unwrap_or_default();

        Ok(Self {
            dataset_path,
            host,
            port,
            log_format,
        })
    }

    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read the dataset file.
    pub fn read_dataset(&self) -> Result<String, ConfigError> {
        std::fs::read_to_string(&self.dataset_path).map_err(|source| {
            ConfigError::DatasetUnreadable {
                path: self.dataset_path.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[("RECIPE_DATASET", "data.csv")])).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data.csv"));
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.bind_address(), "0.0.0.0:8002");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("RECIPE_DATASET", "data.csv"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LOG_FORMAT", "Pretty"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_dataset() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingDataset)
        ));
    }

    #[test]
    fn test_invalid_port() {
        let result = ServiceConfig::from_lookup(lookup(&[
            ("RECIPE_DATASET", "data.csv"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "eighty"));
    }

    #[test]
    fn test_unreadable_dataset() {
        let config = ServiceConfig::from_lookup(lookup(&[(
            "RECIPE_DATASET",
            "/nonexistent/recipes.csv",
        )]))
        .unwrap();
        assert!(matches!(
            config.read_dataset(),
            Err(ConfigError::DatasetUnreadable { .. })
        ));
    }
}
