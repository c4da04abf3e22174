//! # Runtime Configuration Module
//!
//! Environment-driven knobs for how route tables are built and resolved.
//!
//! ## Environment Variables
//!
//! ### `SIMPLE_ROUTER_REQUIRE_FALLBACK`
//!
//! When `true` (or `1`), every route table the router builds must end in a
//! universal catch-all such as `/:path*`. A table without one is rejected
//! when it is built instead of failing later on the first unknown URL.
//!
//! Default: `false`
//!
//! ### `SIMPLE_ROUTER_FALLBACK_PARAM`
//!
//! Capture name used by [`RouteMap::fallback`](crate::router::RouteMap::fallback).
//!
//! Default: `path`
//!
//! ### `SIMPLE_ROUTER_SLOW_RESOLUTION_US`
//!
//! Resolutions that take longer than this many microseconds are logged at
//! `warn` instead of `info`.
//!
//! Default: `1000`
//!
//! ## Usage
//!
//! ```rust
//! use simple_router::config::RouterConfig;
//!
//! let config = RouterConfig::from_env().require_fallback(true);
//! assert!(config.require_fallback);
//! ```

use std::env;
use std::time::Duration;

/// Default capture name for the fallback route.
pub const DEFAULT_FALLBACK_PARAM: &str = "path";

/// Default slow-resolution threshold in microseconds.
pub const DEFAULT_SLOW_RESOLUTION_US: u64 = 1000;

/// Router configuration.
///
/// Load this with [`RouterConfig::from_env()`] and adjust with the builder
/// methods; unparsable environment values fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Reject tables that lack a terminal catch-all
    pub require_fallback: bool,
    /// Capture name for [`RouteMap::fallback`](crate::router::RouteMap::fallback)
    pub fallback_param: String,
    /// Threshold above which a resolution is reported as slow
    pub slow_resolution_us: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            require_fallback: false,
            fallback_param: DEFAULT_FALLBACK_PARAM.to_string(),
            slow_resolution_us: DEFAULT_SLOW_RESOLUTION_US,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// [`RouterConfig::from_env`] is this function over `std::env::var`; tests
    /// use it to avoid touching process-global state.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let require_fallback = lookup("SIMPLE_ROUTER_REQUIRE_FALLBACK")
            .map(|v| parse_bool(&v).unwrap_or(defaults.require_fallback))
            .unwrap_or(defaults.require_fallback);

        let fallback_param = lookup("SIMPLE_ROUTER_FALLBACK_PARAM")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(defaults.fallback_param);

        let slow_resolution_us = lookup("SIMPLE_ROUTER_SLOW_RESOLUTION_US")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.slow_resolution_us);

        Self {
            require_fallback,
            fallback_param,
            slow_resolution_us,
        }
    }

    #[must_use]
    pub fn require_fallback(mut self, require: bool) -> Self {
        self.require_fallback = require;
        self
    }

    #[must_use]
    pub fn fallback_param(mut self, name: impl Into<String>) -> Self {
        self.fallback_param = name.into();
        self
    }

    #[must_use]
    pub fn slow_resolution_us(mut self, micros: u64) -> Self {
        self.slow_resolution_us = micros;
        self
    }

    /// The slow-resolution threshold as a [`Duration`].
    #[must_use]
    pub fn slow_resolution(&self) -> Duration {
        Duration::from_micros(self.slow_resolution_us)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
    fn test_defaults_when_unset() {
        let config = RouterConfig::from_lookup(lookup(&[]));
        assert_eq!(config, RouterConfig::default());
        assert_eq!(config.fallback_param, "path");
    }

    #[test]
    fn test_values_from_environment() {
        let config = RouterConfig::from_lookup(lookup(&[
            ("SIMPLE_ROUTER_REQUIRE_FALLBACK", "true"),
            ("SIMPLE_ROUTER_FALLBACK_PARAM", "rest"),
            ("SIMPLE_ROUTER_SLOW_RESOLUTION_US", "250"),
        ]));
        assert!(config.require_fallback);
        assert_eq!(config.fallback_param, "rest");
        assert_eq!(config.slow_resolution(), Duration::from_micros(250));
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let config = RouterConfig::from_lookup(lookup(&[
            ("SIMPLE_ROUTER_REQUIRE_FALLBACK", "maybe"),
            ("SIMPLE_ROUTER_FALLBACK_PARAM", "not-valid"),
            ("SIMPLE_ROUTER_SLOW_RESOLUTION_US", "fast"),
        ]));
        assert_eq!(config, RouterConfig::default());
    }
}
