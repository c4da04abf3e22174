//! # Router Module
//!
//! Path matching and route resolution.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling path patterns (`/posts/:postId`, `/:path*`) into matchers
//! - Holding an ordered route table and resolving a pathname against it
//! - Re-deriving the table from external inputs when routes depend on them
//!
//! ## Architecture
//!
//! 1. **Compilation**: each declared pattern is validated and turned into an
//!    anchored regex plus the list of capture names ([`Matcher`]).
//!
//! 2. **Resolution**: the pathname is tested against every entry in
//!    declaration order; the first success wins and its captures are
//!    returned with the entry's unit ([`RouteMatch`]). There is no
//!    specificity ranking: `/posts/new` must be declared before
//!    `/posts/:postId` to be reachable.
//!
//! ## Example
//!
//! ```rust
//! use simple_router::router::RouteTable;
//!
//! let table = RouteTable::new([
//!     ("/posts/new", "NewPost"),
//!     ("/posts/:postId", "PostShow"),
//!     ("/:path*", "NotFound"),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.resolve("/posts/new").unwrap().unit, "NewPost");
//!
//! let m = table.resolve("/posts/42").unwrap();
//! assert_eq!(m.unit, "PostShow");
//! assert_eq!(m.param("postId"), Some("42"));
//!
//! let m = table.resolve("/some/unknown/path").unwrap();
//! assert_eq!(m.param("path"), Some("some/unknown/path"));
//! ```
//!
//! ## Not found
//!
//! The table does not special-case "not found". Declaring a universal
//! catch-all last ([`RouteMap::fallback`]) is what turns an unknown URL into a
//! renderable unit; without one, resolution fails with
//! [`RouterError::NoRouteMatched`](crate::RouterError::NoRouteMatched).

mod core;
mod declaration;
mod pattern;

pub use core::{RouteEntry, RouteMap, RouteMatch, RouteTable};
pub use declaration::{DynamicRoutes, RouteDeclaration};
pub use pattern::{Matcher, ParamVec, Segment, MAX_INLINE_PARAMS};
