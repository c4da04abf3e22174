//! RouterCore: keeps the current location in step with the navigation source.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::cell::{LocationCell, RouterEvent, SubscriptionId};
use super::render::{RenderProps, Renderer};
use crate::config::RouterConfig;
use crate::error::Result;
use crate::location::{self, Location, SharedLocation};
use crate::navigation::{ListenerId, Navigate, NavigationSource};
use crate::router::{DynamicRoutes, RouteDeclaration, RouteTable};

type InputsFn<I> = Box<dyn Fn() -> I>;

/// The router.
///
/// Holds the route declaration, the navigation source, and exactly one
/// current [`Location`]. Every navigation (mount, push, replace, or an
/// external change reported by the source) re-reads the URL, resolves it
/// against the table for the *current* inputs, and publishes the result.
///
/// # States
///
/// ```text
/// Uninitialized ──mount──▶ Resolved ──navigation──▶ Resolved ──▶ …
/// ```
///
/// A failed navigation returns the error, notifies subscribers with
/// [`RouterEvent::Failed`], and leaves the last successful location current.
///
/// # Inputs
///
/// `I` is the snapshot of external state the route declaration reads (for a
/// static table it is `()`). The snapshot is fetched from the host through
/// the inputs function at the moment of each resolution, so a back-button
/// event, which carries no inputs of its own, still resolves against the
/// latest state.
pub struct RouterCore<U, S, I = ()> {
    source: S,
    routes: RouteDeclaration<U, I>,
    inputs: InputsFn<I>,
    cell: LocationCell<U>,
    listener: Option<ListenerId>,
    // Set by the listener when a change arrives mid-navigation.
    pending: Rc<Cell<bool>>,
}

#[derive(Debug, Clone, Copy)]
enum Commit {
    Push,
    Replace,
}

impl<U, S, I> fmt::Debug for RouterCore<U, S, I>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterCore")
            .field("source", &self.source)
            .field("routes", &self.routes)
            .field("cell", &self.cell)
            .field("listening", &self.listener.is_some())
            .finish()
    }
}

impl<U, S> RouterCore<U, S, ()>
where
    U: Clone,
    S: NavigationSource,
{
    /// Router over a table built once.
    #[must_use]
    pub fn new(source: S, table: RouteTable<U>) -> Self {
        Self::from_parts(source, RouteDeclaration::Static(table), Box::new(|| ()))
    }

    /// Router over a table built once, checked against `config`.
    ///
    /// # Errors
    ///
    /// [`RouterError::MissingFallback`](crate::RouterError::MissingFallback)
    /// when `config.require_fallback` is set and the table does not end in a
    /// universal catch-all.
    pub fn with_config(source: S, table: RouteTable<U>, config: &RouterConfig) -> Result<Self> {
        if config.require_fallback {
            table.ensure_fallback()?;
        }
        Ok(Self::new(source, table))
    }
}

impl<U, S, I> RouterCore<U, S, I>
where
    U: Clone,
    S: NavigationSource,
    I: PartialEq + Clone,
{
    /// Router whose table is derived from external inputs.
    ///
    /// `inputs` is called at every resolution to fetch the current snapshot.
    pub fn dynamic<F>(source: S, routes: DynamicRoutes<U, I>, inputs: F) -> Self
    where
        F: Fn() -> I + 'static,
    {
        Self::from_parts(source, RouteDeclaration::Dynamic(routes), Box::new(inputs))
    }

    fn from_parts(source: S, routes: RouteDeclaration<U, I>, inputs: InputsFn<I>) -> Self {
        Self {
            source,
            routes,
            inputs,
            cell: LocationCell::new(),
            listener: None,
            pending: Rc::new(Cell::new(false)),
        }
    }

    /// First resolution. Equivalent to [`sync`](Self::sync); calling it
    /// again simply re-resolves.
    ///
    /// # Errors
    ///
    /// See [`sync`](Self::sync).
    pub fn mount(&mut self) -> Result<SharedLocation<U>> {
        let location = self.sync()?;
        info!(url = %location, "Router mounted");
        Ok(location)
    }

    /// Re-read the source's current URL, resolve it, and publish.
    ///
    /// A source change reported while this call was publishing (a subscriber
    /// that navigates, say) is resolved before returning, so the published
    /// location always matches the source's URL afterwards. The result is
    /// that of the last resolution.
    ///
    /// # Errors
    ///
    /// [`RouterError::MalformedUrl`](crate::RouterError::MalformedUrl),
    /// [`RouterError::NoRouteMatched`](crate::RouterError::NoRouteMatched), or
    /// a table-construction error from a dynamic declaration.
    pub fn sync(&mut self) -> Result<SharedLocation<U>> {
        let first = self.sync_once();
        self.replay_pending().unwrap_or(first)
    }

    /// Push `href` onto the source and resolve it.
    ///
    /// Hrefs relative to the current URL (`?page=2`, `edit`, `#top`) are
    /// resolved against it first. A malformed `href` is rejected before the
    /// source is touched.
    ///
    /// # Errors
    ///
    /// See [`sync`](Self::sync).
    pub fn navigate(&mut self, href: &str) -> Result<SharedLocation<U>> {
        self.commit(href, Commit::Push)?;
        self.sync()
    }

    /// Replace the source's current entry with `href` and resolve it.
    ///
    /// # Errors
    ///
    /// See [`navigate`](Self::navigate).
    pub fn replace(&mut self, href: &str) -> Result<SharedLocation<U>> {
        self.commit(href, Commit::Replace)?;
        self.sync()
    }

    /// Resolve `raw` without publishing anything.
    ///
    /// # Errors
    ///
    /// See [`sync`](Self::sync).
    pub fn resolve(&mut self, raw: &str) -> Result<Location<U>> {
        let url = location::parse(raw)?;
        let inputs = (self.inputs)();
        let table = self.routes.table_for(&inputs)?;
        let route = table.resolve(&url.pathname)?;
        Ok(Location::new(url, route))
    }

    fn sync_once(&mut self) -> Result<SharedLocation<U>> {
        let url = self.source.current_url();
        match self.resolve(&url) {
            Ok(location) => {
                let shared = self.cell.publish(location);
                debug!(url = %url, publications = self.cell.publications(), "Location published");
                Ok(shared)
            }
            Err(err) => {
                warn!(url = %url, error = %err, "Navigation failed");
                self.cell.fail(&err);
                Err(err)
            }
        }
    }

    fn replay_pending(&mut self) -> Option<Result<SharedLocation<U>>> {
        let mut last = None;
        while self.pending.replace(false) {
            debug!("Replaying navigation event received during publication");
            last = Some(self.sync_once());
        }
        last
    }

    /// Resolve `href` against the current URL and hand it to the source.
    /// Nothing reaches the source when the href is malformed.
    fn commit(&mut self, href: &str, mode: Commit) -> Result<()> {
        let current = self.source.current_url();
        let target = match location::resolve_href(&current, href)
            .and_then(|target| location::parse(&target).map(|_| target))
        {
            Ok(target) => target,
            Err(err) => {
                warn!(href = %href, error = %err, "Navigation rejected");
                self.cell.fail(&err);
                // A subscriber may have navigated in response.
                if let Some(Err(replayed)) = self.replay_pending() {
                    debug!(error = %replayed, "Replayed navigation failed");
                }
                return Err(err);
            }
        };
        match mode {
            Commit::Push => {
                debug!(href = %target, "Push navigation");
                self.source.push_url(&target);
            }
            Commit::Replace => {
                debug!(href = %target, "Replace navigation");
                self.source.replace_url(&target);
            }
        }
        Ok(())
    }
}

impl<U, S, I> RouterCore<U, S, I> {
    /// The current location; `None` until the first successful resolution.
    #[must_use]
    pub fn location(&self) -> Option<SharedLocation<U>> {
        self.cell.load()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.cell.load().is_some()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of locations published so far.
    #[must_use]
    pub fn publications(&self) -> u64 {
        self.cell.publications()
    }

    /// Run `subscriber` on every publication and failure.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&RouterEvent<'_, U>) + 'static,
    {
        self.cell.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.cell.unsubscribe(id)
    }

    /// Render the current location's unit, or `None` before the first
    /// resolution.
    pub fn render<R>(&self, renderer: &R, inherited: &R::Props) -> Option<R::View>
    where
        R: Renderer<U>,
    {
        let location = self.cell.load()?;
        let props = RenderProps {
            location: &location,
            inherited,
        };
        Some(renderer.render(location.unit(), props))
    }
}

impl<U, S, I> RouterCore<U, S, I>
where
    U: Clone + 'static,
    S: NavigationSource + 'static,
    I: PartialEq + Clone + 'static,
{
    /// Subscribe a shared router to its source's change notifications.
    ///
    /// Each notification triggers [`sync`](Self::sync). The listener holds a
    /// weak reference, so dropping the router silences it. Failures cannot
    /// be returned from a listener; they reach subscribers as
    /// [`RouterEvent::Failed`].
    ///
    /// A notification that arrives while the router is mid-navigation (from
    /// a subscriber reacting to a publication) is queued and resolved by the
    /// navigation already in progress.
    pub fn listen(router: &Rc<RefCell<Self>>) -> ListenerId {
        let weak = Rc::downgrade(router);
        let pending = Rc::clone(&router.borrow().pending);
        let id = router.borrow().source.on_change(Rc::new(move |url: &str| {
            let Some(router) = weak.upgrade() else {
                return;
            };
            let Ok(mut router) = router.try_borrow_mut() else {
                debug!(url = %url, "Navigation event while router is busy; queued");
                pending.set(true);
                return;
            };
            // Failures already reached subscribers as RouterEvent::Failed.
            if let Err(err) = router.sync() {
                debug!(url = %url, error = %err, "Listener-triggered sync failed");
            }
        }));
        router.borrow_mut().listener = Some(id);
        id
    }

    /// Undo [`listen`](Self::listen).
    pub fn unlisten(&mut self) {
        if let Some(id) = self.listener.take() {
            self.source.remove_listener(id);
        }
    }
}

impl<U, S, I> Navigate for RouterCore<U, S, I>
where
    U: Clone,
    S: NavigationSource,
    I: PartialEq + Clone,
{
    /// Only a rejected href is an error here. Once the entry is on the
    /// source, a resolution failure has already reached subscribers as
    /// [`RouterEvent::Failed`].
    fn push(&mut self, href: &str) -> Result<()> {
        self.commit(href, Commit::Push)?;
        if let Err(err) = self.sync() {
            debug!(href = %href, error = %err, "Pushed entry did not resolve");
        }
        Ok(())
    }

    fn replace(&mut self, href: &str) -> Result<()> {
        self.commit(href, Commit::Replace)?;
        if let Err(err) = self.sync() {
            debug!(href = %href, error = %err, "Replaced entry did not resolve");
        }
        Ok(())
    }
}
