//! Single-writer cell holding the current location.

use arc_swap::ArcSwapOption;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::RouterError;
use crate::location::{Location, SharedLocation};

/// Handle returned by [`LocationCell::subscribe`].
pub type SubscriptionId = u64;

/// What a subscriber is told about.
#[derive(Debug)]
pub enum RouterEvent<'a, U> {
    /// A new location became current
    Published(&'a SharedLocation<U>),
    /// A navigation failed; the previous location (if any) is still current
    Failed(&'a RouterError),
}

type Subscriber<U> = Rc<dyn Fn(&RouterEvent<'_, U>)>;

/// Observable current location.
///
/// Only the router writes to it. Reads hand out `Arc` snapshots that stay
/// valid after the next publication, and loading holds no borrow, so a
/// subscriber can read the cell while it is being notified. Subscribers run
/// synchronously, in subscription order, once per publication or failure.
pub struct LocationCell<U> {
    current: ArcSwapOption<Location<U>>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<U>)>>,
    next_id: Cell<SubscriptionId>,
    publications: Cell<u64>,
}

impl<U> Default for LocationCell<U> {
    fn default() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            publications: Cell::new(0),
        }
    }
}

impl<U> fmt::Debug for LocationCell<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationCell")
            .field("current", &self.load().map(|l| l.to_string()))
            .field("subscribers", &self.subscribers.borrow().len())
            .field("publications", &self.publications.get())
            .finish()
    }
}

impl<U> LocationCell<U> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current location, if anything was published yet.
    #[must_use]
    pub fn load(&self) -> Option<SharedLocation<U>> {
        self.current.load_full()
    }

    /// How many locations have been published.
    #[must_use]
    pub fn publications(&self) -> u64 {
        self.publications.get()
    }

    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&RouterEvent<'_, U>) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Replace the current location and notify subscribers.
    pub(crate) fn publish(&self, location: Location<U>) -> SharedLocation<U> {
        let shared = Arc::new(location);
        self.current.store(Some(Arc::clone(&shared)));
        self.publications.set(self.publications.get() + 1);
        self.emit(&RouterEvent::Published(&shared));
        shared
    }

    pub(crate) fn fail(&self, error: &RouterError) {
        self.emit(&RouterEvent::Failed(error));
    }

    // Cloned out so subscribers may subscribe/unsubscribe while running.
    fn emit(&self, event: &RouterEvent<'_, U>) {
        let subscribers: Vec<Subscriber<U>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(event);
        }
    }
}
