//! # Location Module
//!
//! Parsing URL strings into structured locations and building hrefs back
//! out of them.
//!
//! ## Overview
//!
//! - [`parse`] / [`serialize`]: `pathname[?query][#fragment]` ⇄ [`ParsedUrl`]
//! - [`resolve_href`]: link hrefs relative to the current URL made routable
//! - [`Query`]: ordered, last-write-wins string mapping
//! - [`Location`]: a parsed URL joined with the route it resolved to
//!
//! ## Data Flow
//!
//! ```text
//! raw URL ──parse──▶ (pathname, query, hash)
//!                        │
//!                        └─ pathname ──RouteTable::resolve──▶ (unit, captures)
//!                                                                  │
//!                                  Location { pathname, query, hash, params }
//! ```
//!
//! ## Hash Handling
//!
//! The fragment is stored *with* its leading `#` (`#pricing`) and written
//! back verbatim. [`Location::href_for`] never forwards it.

mod core;
mod parser;
mod query;

pub use core::{HrefOverrides, Location, Params, SharedLocation, COMPONENT_KEY};
pub use parser::{parse, resolve_href, serialize, ParsedUrl};
pub use query::{Query, MAX_INLINE_QUERY};
