//! The `Location` value object.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;

use super::parser::{self, ParsedUrl};
use super::query::Query;
use crate::error::Result;
use crate::router::{ParamVec, RouteMatch, RouteTable};

/// Key under which the resolved unit appears when parameters are serialized.
pub const COMPONENT_KEY: &str = "Component";

/// Route parameters of a resolved location.
///
/// Always carries the resolved unit, plus one entry per named capture of the
/// pattern that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Params<U> {
    component: U,
    captures: ParamVec,
}

impl<U> Params<U> {
    #[must_use]
    pub fn new(component: U, captures: ParamVec) -> Self {
        Self {
            component,
            captures,
        }
    }

    /// The resolved unit.
    #[must_use]
    pub fn component(&self) -> &U {
        &self.component
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Captures in pattern order (the unit is not included).
    pub fn captures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.captures.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Number of captures (the unit is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

impl<U: Serialize> Serialize for Params<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.captures.len() + 1))?;
        map.serialize_entry(COMPONENT_KEY, &self.component)?;
        for (k, v) in self.captures() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Overrides for [`Location::href_for`].
///
/// Each field replaces the corresponding part wholesale; there is no
/// per-key merge of queries and no way to carry a hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HrefOverrides {
    pub pathname: Option<String>,
    pub query: Option<Query>,
}

impl HrefOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = Some(pathname.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Immutable snapshot of the current URL and the route it resolved to.
///
/// A new `Location` is built for every successful resolution and replaces the
/// previous one wholesale; it is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Location<U> {
    pathname: String,
    query: Query,
    hash: Option<String>,
    params: Params<U>,
}

impl<U> Location<U> {
    /// Assemble a location from a parsed URL and the route it matched.
    #[must_use]
    pub fn new(url: ParsedUrl, route: RouteMatch<U>) -> Self {
        Self {
            pathname: url.pathname,
            query: url.query,
            hash: url.hash,
            params: Params::new(route.unit, route.params),
        }
    }

    #[must_use]
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Fragment including its leading `#`.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    #[must_use]
    pub fn params(&self) -> &Params<U> {
        &self.params
    }

    /// Shorthand for `self.params().get(name)`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The resolved unit.
    #[must_use]
    pub fn unit(&self) -> &U {
        self.params.component()
    }

    /// Build an href for "same page, different filter" links.
    ///
    /// Starts from this location's pathname and query, replaces either one
    /// wholesale when `overrides` provides it, and never carries the hash.
    ///
    /// ```rust
    /// # use simple_router::router::RouteTable;
    /// # use simple_router::location::{HrefOverrides, Location, Query};
    /// # let table = RouteTable::new([("/:path*", ())]).unwrap();
    /// let location = Location::from_url("/posts/23/edit?order=desc", &table).unwrap();
    ///
    /// assert_eq!(location.href_for(&HrefOverrides::new()), "/posts/23/edit?order=desc");
    /// assert_eq!(
    ///     location.href_for(&HrefOverrides::new().pathname("/foo/bar")),
    ///     "/foo/bar?order=desc"
    /// );
    /// assert_eq!(
    ///     location.href_for(&HrefOverrides::new().query([("page", "2")])),
    ///     "/posts/23/edit?page=2"
    /// );
    /// ```
    #[must_use]
    pub fn href_for(&self, overrides: &HrefOverrides) -> String {
        let pathname = overrides.pathname.as_deref().unwrap_or(&self.pathname);
        let query = overrides.query.as_ref().unwrap_or(&self.query);
        parser::serialize(pathname, query, None)
    }
}

impl<U: Clone> Location<U> {
    /// Parse `raw` and resolve its pathname against `table`.
    ///
    /// # Errors
    ///
    /// [`RouterError::MalformedUrl`](crate::RouterError::MalformedUrl) or
    /// [`RouterError::NoRouteMatched`](crate::RouterError::NoRouteMatched).
    pub fn from_url(raw: &str, table: &RouteTable<U>) -> Result<Self> {
        let url = parser::parse(raw)?;
        let route = table.resolve(&url.pathname)?;
        Ok(Self::new(url, route))
    }
}

/// The serialized URL (pathname, query, hash); params are derived and omitted.
impl<U> fmt::Display for Location<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&parser::serialize(
            &self.pathname,
            &self.query,
            self.hash.as_deref(),
        ))
    }
}

impl<U: Serialize> Serialize for Location<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Location", 4)?;
        state.serialize_field("pathname", &self.pathname)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("hash", &self.hash)?;
        state.serialize_field("params", &self.params)?;
        state.end()
    }
}

/// Shared handle to a published location.
pub type SharedLocation<U> = Arc<Location<U>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new([
            ("/posts/:postId/edit", "PostEdit"),
            ("/:path*", "NotFound"),
        ])
        .unwrap()
    }

    #[test]
    fn test_location_fields() {
        let location = Location::from_url("/posts/23/edit?order=desc", &table()).unwrap();
        assert_eq!(location.pathname(), "/posts/23/edit");
        assert_eq!(location.query(), &Query::from([("order", "desc")]));
        assert_eq!(location.hash(), None);
        assert_eq!(*location.unit(), "PostEdit");
        assert_eq!(location.param("postId"), Some("23"));
    }

    #[test]
    fn test_to_string_ignores_params() {
        let location = Location::from_url("/posts/23/edit?order=desc#c1", &table()).unwrap();
        assert_eq!(location.to_string(), "/posts/23/edit?order=desc#c1");
    }

    #[test]
    fn test_href_for_replaces_query_wholesale_and_drops_hash() {
        let location = Location::from_url("/posts/23/edit?order=desc&page=3#c1", &table()).unwrap();
        assert_eq!(
            location.href_for(&HrefOverrides::new().pathname("/foo/bar").query([("order", "asc")])),
            "/foo/bar?order=asc"
        );
        assert_eq!(
            location.href_for(&HrefOverrides::new().query(Query::new())),
            "/posts/23/edit"
        );
        assert_eq!(
            location.href_for(&HrefOverrides::new()),
            "/posts/23/edit?order=desc&page=3"
        );
    }

    #[test]
    fn test_serialized_snapshot() {
        let location = Location::from_url("/login?return=/about#pricing", &table()).unwrap();
        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            serde_json::json!({
                "pathname": "/login",
                "query": {"return": "/about"},
                "hash": "#pricing",
                "params": {"Component": "NotFound", "path": "login"},
            })
        );
    }
}
