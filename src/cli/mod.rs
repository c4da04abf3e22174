//! # CLI Module
//!
//! Command-line inspection of route tables, for checking a declaration
//! outside the host application.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Compile every pattern in a route file and list the table in resolution
//! order:
//!
//! ```bash
//! simple-router check --routes routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve a URL against a route file and print the location as JSON:
//!
//! ```bash
//! simple-router resolve --routes routes.yaml '/posts/23/edit?order=desc'
//! ```
//!
//! ### `link`
//!
//! Print `intercept` or `native` for a click on `href`:
//!
//! ```bash
//! simple-router link --origin https://www.example.com https://reddit.com
//! ```
//!
//! ## Route Files
//!
//! YAML (`.yaml`/`.yml`) or JSON (`.json`), see [`RoutesFile`]. Router
//! settings come from the environment ([`RouterConfig::from_env`](crate::config::RouterConfig::from_env)),
//! so `SIMPLE_ROUTER_REQUIRE_FALLBACK=true` makes `check` reject tables
//! without a catch-all.

mod commands;
mod routes_file;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
pub use routes_file::{FileFormat, RouteRecord, RoutesFile};
