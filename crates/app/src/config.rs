//! Environment-driven configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const LATENCY_MS_VAR: &str = "SAFEQUOTE_LATENCY_MS";
pub const LOG_FILTER_VAR: &str = "SAFEQUOTE_LOG";
pub const DEFAULT_CATEGORY_VAR: &str = "SAFEQUOTE_CATEGORY";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Session settings for the demo binary and embedding hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated data source latency.
    pub latency: Duration,
    /// Default tracing filter; `RUST_LOG` still takes precedence.
    pub log_filter: String,
    /// Category selection applied by `initialize()`.
    pub default_category: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(500),
            log_filter: "info".to_string(),
            default_category: "todos".to_string(),
        }
    }
}

impl FromEnv for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_latency = env_or_default(LATENCY_MS_VAR, "500");
        let latency_ms = raw_latency
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::ParseError {
                key: LATENCY_MS_VAR.to_string(),
                details: format!("{raw_latency:?}: {e}"),
            })?;

        Ok(Self {
            latency: Duration::from_millis(latency_ms),
            log_filter: env_or_default(LOG_FILTER_VAR, "info"),
            default_category: env_or_default(DEFAULT_CATEGORY_VAR, "todos"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 3] = [LATENCY_MS_VAR, LOG_FILTER_VAR, DEFAULT_CATEGORY_VAR];

    #[test]
    fn defaults_when_nothing_is_set() {
        temp_env::with_vars_unset(ALL_VARS, || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config, AppConfig::default());
        });
    }

    #[test]
    fn reads_every_variable() {
        temp_env::with_vars(
            [
                (LATENCY_MS_VAR, Some("25")),
                (LOG_FILTER_VAR, Some("safequote_app=debug")),
                (DEFAULT_CATEGORY_VAR, Some("mãos")),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert_eq!(config.latency, Duration::from_millis(25));
                assert_eq!(config.log_filter, "safequote_app=debug");
                assert_eq!(config.default_category, "mãos");
            },
        );
    }

    #[test]
    fn zero_latency_is_allowed() {
        temp_env::with_var(LATENCY_MS_VAR, Some("0"), || {
            assert_eq!(AppConfig::from_env().unwrap().latency, Duration::ZERO);
        });
    }

    #[test]
    fn unparsable_latency_is_a_parse_error() {
        temp_env::with_var(LATENCY_MS_VAR, Some("meio segundo"), || {
            let err = AppConfig::from_env().unwrap_err();
            assert!(matches!(&err, ConfigError::ParseError { key, .. } if key == LATENCY_MS_VAR));
            assert!(err.to_string().contains(LATENCY_MS_VAR));
        });
    }

    #[test]
    fn env_required_reports_the_missing_key() {
        temp_env::with_var_unset("SAFEQUOTE_MISSING", || {
            let err = env_required("SAFEQUOTE_MISSING").unwrap_err();
            assert_eq!(err, ConfigError::MissingEnvVar("SAFEQUOTE_MISSING".to_string()));
        });
    }
}
