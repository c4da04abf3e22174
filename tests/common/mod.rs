//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use simple_router::navigation::{ChangeListener, ListenerId, MemoryHistory, NavigationSource};
use simple_router::router::{DynamicRoutes, RouteTable};

/// Units used across the suites; serialized by name in JSON snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Home,
    PostEdit,
    PostShow,
    SignUp,
    Login,
    Dashboard,
    Files,
    NotFound,
}

/// The table most suites resolve against.
pub fn static_table() -> RouteTable<Page> {
    RouteTable::declare(|map| {
        map.route("/", Page::Home)
            .route("/posts/:postId/edit", Page::PostEdit)
            .route("/posts/:postId", Page::PostShow)
            .route("/signup", Page::SignUp)
            .route("/login", Page::Login)
            .route("/files/:rest*", Page::Files)
            .fallback(Page::NotFound);
    })
    .unwrap()
}

/// Host state read by [`session_routes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub logged_in: bool,
}

/// `/` is the dashboard when logged in and the login page otherwise.
pub fn session_routes() -> DynamicRoutes<Page, Session> {
    DynamicRoutes::new(|map, session: &Session| {
        if session.logged_in {
            map.route("/", Page::Dashboard);
        } else {
            map.route("/", Page::Login);
        }
        map.route("/signup", Page::SignUp).fallback(Page::NotFound);
    })
}

/// [`MemoryHistory`] wrapper recording every push and replace.
#[derive(Debug, Clone, Default)]
pub struct SpySource {
    history: MemoryHistory,
    pushes: Rc<RefCell<Vec<String>>>,
    replaces: Rc<RefCell<Vec<String>>>,
}

impl SpySource {
    pub fn new(initial_url: &str) -> Self {
        Self {
            history: MemoryHistory::new(initial_url),
            ..Self::default()
        }
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.borrow().clone()
    }

    pub fn replaces(&self) -> Vec<String> {
        self.replaces.borrow().clone()
    }
}

impl NavigationSource for SpySource {
    fn current_url(&self) -> String {
        self.history.current_url()
    }

    fn push_url(&self, url: &str) {
        self.pushes.borrow_mut().push(url.to_string());
        self.history.push_url(url);
    }

    fn replace_url(&self, url: &str) {
        self.replaces.borrow_mut().push(url.to_string());
        self.history.replace_url(url);
    }

    fn on_change(&self, listener: ChangeListener) -> ListenerId {
        self.history.on_change(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.history.remove_listener(id);
    }
}
