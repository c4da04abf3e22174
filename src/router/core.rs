//! Route table: ordered entries, first match wins.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::pattern::{Matcher, ParamVec};
use crate::config::{RouterConfig, DEFAULT_FALLBACK_PARAM, DEFAULT_SLOW_RESOLUTION_US};
use crate::error::{Result, RouterError};

/// A declared route: compiled pattern plus the view unit it selects.
#[derive(Debug, Clone)]
pub struct RouteEntry<U> {
    matcher: Matcher,
    unit: U,
}

impl<U> RouteEntry<U> {
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[must_use]
    pub fn unit(&self) -> &U {
        &self.unit
    }
}

/// Result of successfully resolving a path against a [`RouteTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<U> {
    /// The unit of the first entry whose pattern matched
    pub unit: U,
    /// Captures extracted from the path (e.g. `:postId` → `"42"`)
    pub params: ParamVec,
    /// The pattern that matched, as declared
    pub pattern: Arc<str>,
    /// Position of the matching entry in declaration order
    pub index: usize,
}

impl<U> RouteMatch<U> {
    /// Get a captured parameter by name.
    ///
    /// Uses "last write wins" semantics, although compiled patterns never
    /// declare the same name twice.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered list of routes.
///
/// Resolution walks the entries in declaration order and returns the first
/// match, regardless of how specific later patterns are. The table holds no
/// mutable matcher state, so resolving is a pure function of (path, table).
#[derive(Clone)]
pub struct RouteTable<U> {
    entries: Vec<RouteEntry<U>>,
    slow_threshold: Duration,
}

impl<U> fmt::Debug for RouteTable<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("patterns", &self.patterns().collect::<Vec<_>>())
            .finish()
    }
}

impl<U> RouteTable<U> {
    /// Build a table from `(pattern, unit)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouterError::PatternSyntax`] encountered.
    pub fn new<'a, I>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, U)>,
    {
        let mut map = RouteMap::new();
        for (pattern, unit) in routes {
            map.route(pattern, unit);
        }
        map.into_table()
    }

    /// Build a table by running a declaration callback against a fresh
    /// [`RouteMap`].
    ///
    /// ```rust
    /// use simple_router::router::RouteTable;
    ///
    /// let table = RouteTable::declare(|map| {
    ///     map.route("/", "Home");
    ///     map.route("/posts/:postId", "PostShow");
    ///     map.fallback("NotFound");
    /// })
    /// .unwrap();
    /// assert_eq!(table.resolve("/posts/7").unwrap().unit, "PostShow");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first [`RouterError::PatternSyntax`] recorded by the map.
    pub fn declare<F>(declare: F) -> Result<Self>
    where
        F: FnOnce(&mut RouteMap<U>),
    {
        let mut map = RouteMap::new();
        declare(&mut map);
        map.into_table()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry<U>] {
        &self.entries
    }

    /// Declared patterns in resolution order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(RouteEntry::pattern)
    }

    /// True when the last entry is a universal catch-all, meaning
    /// [`resolve`](Self::resolve) can never report
    /// [`RouterError::NoRouteMatched`].
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.entries
            .last()
            .is_some_and(|entry| entry.matcher.is_universal())
    }

    /// Fail with [`RouterError::MissingFallback`] unless the table ends in a
    /// universal catch-all.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn ensure_fallback(&self) -> Result<()> {
        if self.has_fallback() {
            Ok(())
        } else {
            Err(RouterError::MissingFallback)
        }
    }
}

impl<U: Clone> RouteTable<U> {
    /// Resolve `path` to the first matching entry.
    ///
    /// # Arguments
    ///
    /// * `path` - A pathname without query or fragment (e.g. `/posts/42`)
    ///
    /// # Errors
    ///
    /// [`RouterError::NoRouteMatched`] when no entry matches. Tables that end
    /// in `/:path*` never produce this.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<U>> {
        debug!(path = %path, routes_count = self.entries.len(), "Route match attempt");

        let start = Instant::now();
        let found = self
            .entries
            .iter()
            .enumerate()
            .find_map(|(index, entry)| entry.matcher.matches(path).map(|p| (index, entry, p)));
        let elapsed = start.elapsed();

        let Some((index, entry, params)) = found else {
            warn!(
                path = %path,
                duration_us = elapsed.as_micros(),
                "No route matched"
            );
            return Err(RouterError::NoRouteMatched {
                path: path.to_string(),
            });
        };

        if elapsed > self.slow_threshold {
            warn!(
                path = %path,
                pattern = %entry.pattern(),
                index,
                path_params = ?params,
                duration_us = elapsed.as_micros(),
                "Slow route resolution detected"
            );
        } else {
            info!(
                path = %path,
                pattern = %entry.pattern(),
                index,
                path_params = ?params,
                duration_us = elapsed.as_micros(),
                "Route matched"
            );
        }

        Ok(RouteMatch {
            unit: entry.unit.clone(),
            params,
            pattern: Arc::from(entry.pattern()),
            index,
        })
    }
}

/// Registration callback handed to route declarations.
///
/// Each call to [`route`](Self::route) appends an entry in declaration
/// order. Syntax errors do not interrupt the declaration; the first one is
/// kept and reported by [`into_table`](Self::into_table).
pub struct RouteMap<U> {
    entries: Vec<RouteEntry<U>>,
    error: Option<RouterError>,
    fallback_param: String,
    slow_threshold: Duration,
}

impl<U> Default for RouteMap<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> RouteMap<U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
            fallback_param: DEFAULT_FALLBACK_PARAM.to_string(),
            slow_threshold: Duration::from_micros(DEFAULT_SLOW_RESOLUTION_US),
        }
    }

    /// A map that names its fallback capture and reports slow resolutions
    /// according to `config`.
    #[must_use]
    pub fn with_config(config: &RouterConfig) -> Self {
        Self {
            entries: Vec::new(),
            error: None,
            fallback_param: config.fallback_param.clone(),
            slow_threshold: config.slow_resolution(),
        }
    }

    /// Declare `pattern` → `unit`.
    pub fn route(&mut self, pattern: &str, unit: U) -> &mut Self {
        match Matcher::compile(pattern) {
            Ok(matcher) => self.entries.push(RouteEntry { matcher, unit }),
            Err(err) => {
                warn!(pattern = %pattern, error = %err, "Rejected route pattern");
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Declare the universal catch-all `/:<fallback_param>*` → `unit`.
    ///
    /// Call this last: anything declared after it is unreachable.
    pub fn fallback(&mut self, unit: U) -> &mut Self {
        let pattern = format!("/:{}*", self.fallback_param);
        self.route(&pattern, unit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish the declaration.
    ///
    /// # Errors
    ///
    /// The first pattern error recorded during declaration.
    pub fn into_table(self) -> Result<RouteTable<U>> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let summary: Vec<&str> = self.entries.iter().take(10).map(RouteEntry::pattern).collect();
        info!(
            routes_count = self.entries.len(),
            routes_summary = ?summary,
            "Routing table loaded"
        );

        Ok(RouteTable {
            entries: self.entries,
            slow_threshold: self.slow_threshold,
        })
    }
}
