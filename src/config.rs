//! Process-wide configuration, loaded from environment variables at startup.
//!
//! The core solving pipeline itself takes only `respect_preferences` and
//! `time_limit_seconds` per request — everything here is HTTP-adaptor glue
//! (host/port/CORS) plus the solver defaults applied when a request omits
//! them.

use std::env;
use thiserror::Error;
use tracing::Level;

use crate::logging::LogConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Application-wide settings, resolved once at process startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Default solver wall-clock budget when a request omits it.
    pub solver_timeout_seconds: u32,
    /// Fixed random seed passed to the solver for deterministic search.
    pub solver_seed: u64,
    pub log_level: Level,
    /// Allowed CORS origins; empty means "allow any" (development default).
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            solver_timeout_seconds: 30,
            solver_seed: 42,
            log_level: Level::INFO,
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables, first populating the
    /// process environment from a local `.env` file if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            host: env_var_or("SCHEDULER_HOST", &defaults.host),
            port: env_parsed_or("SCHEDULER_PORT", defaults.port)?,
            solver_timeout_seconds: env_parsed_or(
                "SCHEDULER_SOLVER_TIMEOUT_SECONDS",
                defaults.solver_timeout_seconds,
            )?,
            solver_seed: env_parsed_or("SCHEDULER_SOLVER_SEED", defaults.solver_seed)?,
            log_level: env::var("SCHEDULER_LOG_LEVEL")
                .map(|v| LogConfig::level_from_str(&v))
                .unwrap_or(defaults.log_level),
            cors_origins: env::var("SCHEDULER_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_settings_py() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.solver_timeout_seconds, 30);
        assert_eq!(config.solver_seed, 42);
    }

    #[test]
    fn env_var_or_falls_back_to_default() {
        let val = env_var_or("SCHEDULER_NON_EXISTENT_VAR_ABC", "fallback");
        assert_eq!(val, "fallback");
    }

    #[test]
    fn env_parsed_or_rejects_unparseable_values() {
        std::env::set_var("SCHEDULER_TEST_PARSE_VAR", "not-a-number");
        let result: Result<u16, ConfigError> = env_parsed_or("SCHEDULER_TEST_PARSE_VAR", 1);
        std::env::remove_var("SCHEDULER_TEST_PARSE_VAR");
        assert!(result.is_err());
    }
}
