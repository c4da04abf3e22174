//! # Engine Module
//!
//! [`RouterCore`] ties the pieces together:
//!
//! ```text
//! NavigationSource ──URL──▶ parse ──▶ RouteTable::resolve ──▶ Location
//!        ▲                                  ▲                     │
//!        │ push / replace                   │ inputs snapshot     ▼
//!   Link clicks, navigate()            host inputs fn       LocationCell ──▶ subscribers / Renderer
//! ```
//!
//! ## Concurrency
//!
//! Everything runs synchronously on the thread that delivers navigation
//! events. Each event is fully resolved and published before the next one is
//! accepted, so locations are never published out of order. A change the
//! source reports while a navigation is still publishing is queued and
//! resolved before that navigation returns. The router and its subscribers
//! are built on `Rc`/`RefCell`, so none of this is `Send`. The current
//! location is an `Arc` snapshot: a subscriber may keep it past the next
//! publication.
//!
//! ## Wiring External Changes
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use simple_router::engine::RouterCore;
//! use simple_router::navigation::{MemoryHistory, NavigationSource};
//! use simple_router::router::RouteTable;
//!
//! let history = MemoryHistory::new("/");
//! let table = RouteTable::new([("/", "Home"), ("/about", "About")]).unwrap();
//! let router = Rc::new(RefCell::new(RouterCore::new(history.clone(), table)));
//! RouterCore::listen(&router);
//!
//! router.borrow_mut().mount().unwrap();
//! router.borrow_mut().navigate("/about").unwrap();
//! history.back();
//! let current = router.borrow().location().unwrap();
//! assert_eq!(*current.unit(), "Home");
//! ```

mod cell;
mod core;
mod render;

pub use cell::{LocationCell, RouterEvent, SubscriptionId};
pub use core::RouterCore;
pub use render::{RenderProps, Renderer};
