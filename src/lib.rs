//! # simple-router
//!
//! **simple-router** is a declarative client-side router: an ordered table of URL patterns,
//! structured locations built from the current URL, and link interception that keeps
//! same-origin navigation in-page.
//!
//! ## Overview
//!
//! A host application (a single-page UI, a test harness, a native shell embedding a web
//! view) declares which *unit* renders for which URL pattern. The router reads the current
//! URL from a navigation source, resolves it against the table, and publishes an immutable
//! [`Location`] that the host renders. Link clicks that stay on the same origin become a
//! history push instead of a full page load.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern compilation and first-match-wins resolution over an ordered table
//! - **[`location`]** - URL parsing, the query mapping, and the `Location` value object
//! - **[`navigation`]** - The navigation-source trait, in-memory history, and link interception
//! - **[`engine`]** - `RouterCore`: keeps exactly one current location in step with the source
//! - **[`config`]** - Runtime settings loaded from the environment
//! - **[`logging`]** - Subscriber setup for binaries (the library only emits `tracing` events)
//! - **[`cli`]** - Route-table inspection commands behind the `simple-router` binary
//!
//! ### Navigation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant Link as navigation::Link
//!     participant Core as engine::RouterCore
//!     participant Source as NavigationSource
//!     participant Table as router::RouteTable
//!     participant Cell as engine::LocationCell
//!
//!     User->>Link: click "/posts/23/edit"
//!     Link->>Link: LinkInterceptor::decide_click
//!     Link->>Core: push(href)
//!     Core->>Source: push_url(href)
//!     Core->>Source: current_url()
//!     Core->>Table: resolve(pathname)
//!     Table-->>Core: RouteMatch { unit, params }
//!     Core->>Cell: publish(Location)
//!     Cell-->>User: subscribers re-render
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_router::{ClickEvent, Link, LinkInterceptor, MemoryHistory, RouteTable, RouterCore};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Page {
//!     PostEdit,
//!     SignUp,
//!     NotFound,
//! }
//!
//! let table = RouteTable::declare(|map| {
//!     map.route("/posts/:postId/edit", Page::PostEdit)
//!         .route("/signup", Page::SignUp)
//!         .fallback(Page::NotFound);
//! })
//! .unwrap();
//!
//! let history = MemoryHistory::new("/signup");
//! let mut router = RouterCore::new(history.clone(), table);
//! router.mount().unwrap();
//!
//! let interceptor = LinkInterceptor::new("https://www.example.com").unwrap();
//! Link::new("/posts/23/edit?order=desc")
//!     .click(&interceptor, &ClickEvent::primary(), &mut router)
//!     .unwrap();
//!
//! let location = router.location().unwrap();
//! assert_eq!(*location.unit(), Page::PostEdit);
//! assert_eq!(location.param("postId"), Some("23"));
//! assert_eq!(location.query().get("order"), Some("desc"));
//! assert_eq!(history.entries(), vec!["/signup", "/posts/23/edit?order=desc"]);
//! ```
//!
//! ## Pattern Syntax
//!
//! | Segment     | Matches                                   | Captured as            |
//! |-------------|-------------------------------------------|------------------------|
//! | `posts`     | the literal text `posts`                  | nothing                |
//! | `:postId`   | exactly one non-empty segment             | `postId`               |
//! | `:path*`    | zero or more segments (final segment only)| `path`, `/`-joined     |
//!
//! Precedence is strict declaration order. Declare the catch-all last.
//!
//! ## Threading
//!
//! Resolution is pure and the table is immutable once built, but the router and its
//! navigation source are single-threaded (`Rc`/`RefCell`): one navigation event is fully
//! handled before the next one is taken.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod router;

pub use config::RouterConfig;
pub use engine::{LocationCell, RenderProps, Renderer, RouterCore, RouterEvent};
pub use error::{PatternSyntaxReason, Result, RouterError};
pub use location::{HrefOverrides, Location, ParsedUrl, Query, SharedLocation};
pub use navigation::{
    ClickEvent, ClickOutcome, Link, LinkDecision, LinkInterceptor, LinkTag, MemoryHistory,
    Navigate, NavigationSource,
};
pub use router::{DynamicRoutes, RouteDeclaration, RouteMap, RouteMatch, RouteTable};
