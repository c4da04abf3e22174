//! The thing that holds the current URL.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Handle returned by [`NavigationSource::on_change`].
pub type ListenerId = u64;

/// Callback invoked with the new URL after an external change.
pub type ChangeListener = Rc<dyn Fn(&str)>;

/// Abstraction over the browser history (or any stand-in for it).
///
/// Implementations are shared handles: every method takes `&self`, exactly
/// as `window.history` can be reached from anywhere on the page.
///
/// # Contract
///
/// - `push_url` / `replace_url` apply synchronously, so an immediate
///   `current_url()` reflects them, and they do **not** notify listeners.
/// - Every externally triggered change (back, forward, ...) notifies each
///   listener exactly once, after the new URL is current.
pub trait NavigationSource {
    fn current_url(&self) -> String;
    fn push_url(&self, url: &str);
    fn replace_url(&self, url: &str);
    fn on_change(&self, listener: ChangeListener) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);
}

struct HistoryState {
    entries: Vec<String>,
    index: usize,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: ListenerId,
}

/// In-memory history stack with back/forward, for hosts without a browser
/// and for tests.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryState>>,
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MemoryHistory")
            .field("entries", &state.entries)
            .field("index", &state.index)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HistoryState {
                entries: vec![initial_url.into()],
                index: 0,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Position of the current entry.
    #[must_use]
    pub fn index(&self) -> usize {
        self.inner.borrow().index
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.inner.borrow().entries.clone()
    }

    /// Go back one entry. Returns false (and notifies nobody) at the start.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Go forward one entry. Returns false (and notifies nobody) at the end.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move `delta` entries through the stack, like `history.go(delta)`.
    ///
    /// Out-of-range moves and `go(0)` do nothing and return false.
    pub fn go(&self, delta: isize) -> bool {
        let url = {
            let mut state = self.inner.borrow_mut();
            let Some(target) = state.index.checked_add_signed(delta) else {
                return false;
            };
            if delta == 0 || target >= state.entries.len() {
                return false;
            }
            state.index = target;
            state.entries[target].clone()
        };
        debug!(delta, url = %url, "History traversal");
        self.notify(&url);
        true
    }

    /// Navigate from outside the router (address bar, another script),
    /// pushing a new entry and notifying listeners.
    pub fn visit(&self, url: &str) {
        self.push_entry(url);
        debug!(url = %url, "External navigation");
        self.notify(url);
    }

    fn push_entry(&self, url: &str) {
        let mut state = self.inner.borrow_mut();
        let keep = state.index + 1;
        state.entries.truncate(keep);
        state.entries.push(url.to_string());
        state.index = keep;
    }

    // Listeners are cloned out first so they can call back into the history.
    fn notify(&self, url: &str) {
        let listeners: Vec<ChangeListener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(url);
        }
    }
}

impl NavigationSource for MemoryHistory {
    fn current_url(&self) -> String {
        let state = self.inner.borrow();
        state.entries[state.index].clone()
    }

    fn push_url(&self, url: &str) {
        self.push_entry(url);
    }

    fn replace_url(&self, url: &str) {
        let mut state = self.inner.borrow_mut();
        let index = state.index;
        state.entries[index] = url.to_string();
    }

    fn on_change(&self, listener: ChangeListener) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
    }
}
