//! Link click interception.
//!
//! A click on a router link either becomes a history push handled in-page,
//! or is left alone so the browser performs a normal navigation. The
//! decision only depends on the link's href, the document origin, and how
//! the click was made; which element the link renders as is a separate,
//! orthogonal setting ([`LinkTag`]).

use std::fmt;
use tracing::debug;
use url::Url;

use crate::error::{Result, RouterError};

/// Anything that can perform an in-page navigation.
///
/// [`RouterCore`](crate::engine::RouterCore) implements this; link clicks go
/// through it so the router re-resolves right after the history changes.
///
/// An `Err` means the href was rejected and history was left untouched.
/// Once an entry has been added, the navigation counts as done even if
/// nothing routes it; that failure is reported to the router's subscribers.
pub trait Navigate {
    /// Add a history entry for `href` and make it current.
    fn push(&mut self, href: &str) -> Result<()>;
    /// Overwrite the current history entry with `href`.
    fn replace(&mut self, href: &str) -> Result<()>;
}

/// Outcome of the interception decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDecision {
    /// Handle in-page and suppress the browser's own navigation
    Intercept,
    /// Let the browser navigate
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Other(u16),
}

/// The parts of a click event the interceptor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickEvent {
    pub button: MouseButton,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ClickEvent {
    /// An unmodified primary-button click.
    #[must_use]
    pub fn primary() -> Self {
        Self::default()
    }

    /// True for clicks that ask for a new tab/window or a download.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt || self.button != MouseButton::Primary
    }
}

/// Result of activating a [`Link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The router pushed the href; the host must prevent the default action
    Pushed,
    /// The router replaced the current entry; the host must prevent the default action
    Replaced,
    /// Nothing was done; the browser navigates normally
    Native,
}

impl ClickOutcome {
    /// Whether the host should call `preventDefault()` on the event.
    #[must_use]
    pub fn prevent_default(self) -> bool {
        !matches!(self, ClickOutcome::Native)
    }
}

/// Decides whether a link activation should be handled by the router.
#[derive(Debug, Clone)]
pub struct LinkInterceptor {
    document: Url,
}

impl LinkInterceptor {
    /// # Errors
    ///
    /// [`RouterError::InvalidOrigin`] unless `origin` is an absolute
    /// hierarchical URL such as `https://www.example.com`.
    pub fn new(origin: &str) -> Result<Self> {
        let invalid = || RouterError::InvalidOrigin {
            origin: origin.to_string(),
        };
        let document = Url::parse(origin).map_err(|_| invalid())?;
        if document.cannot_be_a_base() || !document.origin().is_tuple() {
            return Err(invalid());
        }
        Ok(Self { document })
    }

    /// The document URL hrefs are resolved against.
    #[must_use]
    pub fn document(&self) -> &Url {
        &self.document
    }

    /// Origin-only decision: same origin (including any relative href) is
    /// intercepted, anything else (other scheme, host, or port) is native.
    ///
    /// An href that cannot be resolved at all is left to the browser.
    #[must_use]
    pub fn decide(&self, href: &str) -> LinkDecision {
        let decision = match self.document.join(href) {
            Ok(target) if target.origin() == self.document.origin() => LinkDecision::Intercept,
            _ => LinkDecision::Native,
        };
        debug!(href = %href, origin = %self.document.origin().ascii_serialization(), ?decision, "Link decision");
        decision
    }

    /// Full decision for a click: modified clicks and links opening in
    /// another browsing context are always native.
    #[must_use]
    pub fn decide_click(&self, href: &str, event: &ClickEvent, target: Option<&str>) -> LinkDecision {
        if event.is_modified() {
            return LinkDecision::Native;
        }
        if target.is_some_and(|t| !t.is_empty() && !t.eq_ignore_ascii_case("_self")) {
            return LinkDecision::Native;
        }
        self.decide(href)
    }
}

/// Element a [`Link`] renders as.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkTag {
    #[default]
    Anchor,
    Button,
    Custom(String),
}

impl LinkTag {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            LinkTag::Anchor => "a",
            LinkTag::Button => "button",
            LinkTag::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for LinkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag plus attributes for the host's renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl LinkElement {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A navigation link that renders as any element and routes clicks in-page
/// when the interceptor allows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    href: String,
    tag: LinkTag,
    replace: bool,
    target: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            tag: LinkTag::Anchor,
            replace: false,
            target: None,
        }
    }

    /// Render as `tag` instead of `<a>`. Click handling is unchanged.
    #[must_use]
    pub fn tag(mut self, tag: LinkTag) -> Self {
        self.tag = tag;
        self
    }

    /// Replace the current history entry instead of pushing a new one.
    #[must_use]
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Browsing-context target (`_blank`, a frame name, ...).
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    #[must_use]
    pub fn is_replace(&self) -> bool {
        self.replace
    }

    /// Element description for the renderer.
    #[must_use]
    pub fn element(&self) -> LinkElement {
        let mut attributes = vec![("href".to_string(), self.href.clone())];
        if self.tag == LinkTag::Button {
            attributes.push(("type".to_string(), "button".to_string()));
        }
        if let Some(target) = &self.target {
            attributes.push(("target".to_string(), target.clone()));
        }
        LinkElement {
            tag: self.tag.as_str().to_string(),
            attributes,
        }
    }

    /// Handle a click on this link.
    ///
    /// Issues exactly one `push` (or `replace`, if configured) through
    /// `navigator` when the click is intercepted, and nothing otherwise.
    /// A pushed href that no route matches is still `Pushed`: the entry is in
    /// history, so the host must suppress the browser's navigation.
    ///
    /// # Errors
    ///
    /// The navigator rejected the href before touching history (a malformed
    /// href). The host can leave the click to the browser.
    pub fn click<N>(
        &self,
        interceptor: &LinkInterceptor,
        event: &ClickEvent,
        navigator: &mut N,
    ) -> Result<ClickOutcome>
    where
        N: Navigate + ?Sized,
    {
        match interceptor.decide_click(&self.href, event, self.target.as_deref()) {
            LinkDecision::Native => Ok(ClickOutcome::Native),
            LinkDecision::Intercept if self.replace => {
                navigator.replace(&self.routable_href(interceptor))?;
                Ok(ClickOutcome::Replaced)
            }
            LinkDecision::Intercept => {
                navigator.push(&self.routable_href(interceptor))?;
                Ok(ClickOutcome::Pushed)
            }
        }
    }

    // A network-path href (`//host/path`) only has a path once the
    // document's scheme is applied.
    fn routable_href(&self, interceptor: &LinkInterceptor) -> String {
        if self.href.starts_with("//") {
            if let Ok(target) = interceptor.document.join(&self.href) {
                return target.into();
            }
        }
        self.href.clone()
    }
}
