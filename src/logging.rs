//! Structured logging setup for binaries embedding the router.
//!
//! The library itself only emits `tracing` events; nothing in it installs a
//! subscriber. Call [`init_logging`] once from `main` to get JSON (default)
//! or pretty output.
//!
//! | Variable                      | Default | Meaning                                   |
//! |-------------------------------|---------|-------------------------------------------|
//! | `SIMPLE_ROUTER_LOG_LEVEL`     | `info`  | trace/debug/info/warn/error               |
//! | `SIMPLE_ROUTER_LOG_FORMAT`    | `json`  | `json` or `pretty`                        |
//! | `SIMPLE_ROUTER_LOG_TARGETS`   | unset   | extra filter directives, comma-separated  |
//! | `SIMPLE_ROUTER_LOG_LOCATION`  | `false` | include file:line in each record          |
//!
//! `RUST_LOG`, when set, takes precedence over the level.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra `EnvFilter` directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup("SIMPLE_ROUTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: lookup("SIMPLE_ROUTER_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            target_filter: lookup("SIMPLE_ROUTER_LOG_TARGETS").filter(|s| !s.trim().is_empty()),
            include_location: lookup("SIMPLE_ROUTER_LOG_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Filter built from `RUST_LOG` (if set) or the level, plus the target
    /// directives. Invalid directives are skipped with a warning on stderr.
    pub fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use simple_router::logging::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::from_env()).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json);
    }

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_log_config_from_lookup() {
        let config = LogConfig::from_lookup(lookup(&[
            ("SIMPLE_ROUTER_LOG_LEVEL", "debug"),
            ("SIMPLE_ROUTER_LOG_FORMAT", "pretty"),
            ("SIMPLE_ROUTER_LOG_TARGETS", "simple_router::router=trace"),
            ("SIMPLE_ROUTER_LOG_LOCATION", "true"),
        ]));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target_filter.as_deref(), Some("simple_router::router=trace"));
        assert!(config.include_location);
    }

    #[test]
    fn test_unparsable_location_flag_falls_back() {
        let config = LogConfig::from_lookup(lookup(&[("SIMPLE_ROUTER_LOG_LOCATION", "yes please")]));
        assert!(!config.include_location);
    }

    #[test]
    fn test_level_mapping() {
        let mut config = LogConfig::from_lookup(lookup(&[("SIMPLE_ROUTER_LOG_LEVEL", "DEBUG")]));
        assert_eq!(config.level(), Level::DEBUG);
        config.log_level = "nonsense".to_string();
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_second_init_is_an_error() {
        let config = LogConfig::default();
        // Another test binary thread may have won the race; either way the
        // second call must fail rather than panic.
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
