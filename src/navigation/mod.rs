//! # Navigation Module
//!
//! The boundary between the router and whatever holds the current URL.
//!
//! - [`NavigationSource`]: current URL, push/replace, change notifications.
//!   [`MemoryHistory`] is an in-memory implementation with a back/forward
//!   stack.
//! - [`LinkInterceptor`] and [`Link`]: decide whether a click is handled
//!   in-page (one `push`) or left to the browser (nothing at all).
//!
//! ## Interception Rules
//!
//! | Click                                         | Result  |
//! |-----------------------------------------------|---------|
//! | relative href (`/posts`, `?page=2`)           | push    |
//! | absolute href, same scheme + host + port      | push    |
//! | absolute href, any other origin               | native  |
//! | ctrl/meta/shift/alt or non-primary button     | native  |
//! | `target` other than `_self`                   | native  |

mod link;
mod source;

pub use link::{
    ClickEvent, ClickOutcome, Link, LinkDecision, LinkElement, LinkInterceptor, LinkTag,
    MouseButton, Navigate,
};
pub use source::{ChangeListener, ListenerId, MemoryHistory, NavigationSource};
