//! Structured logging setup for the scheduler service.
//!
//! Unlike a desktop application writing rotating log files to disk, this is a
//! stateless HTTP service: logs go to stdout, one event per line, and the
//! surrounding process supervisor (systemd, a container runtime, ...) owns
//! retention. `LogConfig` mirrors the development/production preset pattern
//! used elsewhere in this codebase but drops file-rotation concerns.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Emit newline-delimited JSON instead of the human-readable format.
    pub json: bool,
    pub with_target: bool,
    pub with_line_number: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: if cfg!(debug_assertions) {
                Level::DEBUG
            } else {
                Level::INFO
            },
            json: !cfg!(debug_assertions),
            with_target: true,
            with_line_number: true,
        }
    }
}

impl LogConfig {
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            with_target: true,
            with_line_number: true,
        }
    }

    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            with_target: true,
            with_line_number: false,
        }
    }

    /// Parse a `tracing::Level` from a `SCHEDULER_LOG_LEVEL` string, falling
    /// back to `INFO` on anything unrecognised.
    pub fn level_from_str(s: &str) -> Level {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Initializes the global `tracing` subscriber. Must be called exactly once,
/// as early as possible in `main`.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            config.level
        ))
    });

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(config.with_target)
        .with_line_number(config.with_line_number);

    if config.json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_debug_assertions() {
        let config = LogConfig::default();
        assert_eq!(config.json, !cfg!(debug_assertions));
    }

    #[test]
    fn development_preset_is_pretty_and_verbose() {
        let config = LogConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.json);
    }

    #[test]
    fn production_preset_is_json_and_quiet() {
        let config = LogConfig::production();
        assert_eq!(config.level, Level::INFO);
        assert!(config.json);
        assert!(!config.with_line_number);
    }

    #[test]
    fn level_from_str_parses_known_levels() {
        assert_eq!(LogConfig::level_from_str("debug"), Level::DEBUG);
        assert_eq!(LogConfig::level_from_str("WARN"), Level::WARN);
        assert_eq!(LogConfig::level_from_str("bogus"), Level::INFO);
    }
}
