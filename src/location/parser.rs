//! URL string ⇄ (pathname, query, hash).
//!
//! Accepted input is either a path-absolute reference
//! (`/posts/42?order=desc#comments`) or an absolute URL
//! (`https://www.example.com/posts/42`). Relative references are split by
//! hand so the pathname is kept exactly as written; absolute URLs go through
//! the `url` crate, which also validates scheme and host.
//!
//! Hrefs taken from links may be relative to the current document
//! (`?page=2`, `edit`, `#top`); [`resolve_href`] turns them into one of the
//! two accepted forms first.

use serde::Serialize;
use url::Url;

use super::query::Query;
use crate::error::{Result, RouterError};

/// The URL-derived half of a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    /// Path component, unmodified (a trailing `/` is kept)
    pub pathname: String,
    /// Decoded query component; empty when absent
    pub query: Query,
    /// Fragment including its leading `#`, or `None` when absent
    pub hash: Option<String>,
}

impl ParsedUrl {
    /// Serialize back to a URL string. See [`serialize`].
    #[must_use]
    pub fn to_url_string(&self) -> String {
        serialize(&self.pathname, &self.query, self.hash.as_deref())
    }
}

/// Parse a raw URL string.
///
/// # Errors
///
/// [`RouterError::MalformedUrl`] when the input is empty, contains control
/// characters, is a relative reference that does not start with `/`, is a
/// network-path reference (`//host/path`), or is an absolute URL that cannot carry a path (e.g. `mailto:`).
pub fn parse(raw: &str) -> Result<ParsedUrl> {
    if raw.is_empty() {
        return Err(RouterError::malformed(raw, "empty URL"));
    }
    if raw.chars().any(char::is_control) {
        return Err(RouterError::malformed(raw, "control characters are not allowed"));
    }

    match Url::parse(raw) {
        Ok(url) => from_absolute(raw, &url),
        Err(url::ParseError::RelativeUrlWithoutBase) => from_relative(raw),
        Err(err) => Err(RouterError::malformed(raw, err.to_string())),
    }
}

/// Resolve a link href against the URL currently shown.
///
/// Path-absolute hrefs and absolute URLs are returned unchanged. Anything
/// else (query-only, fragment-only, or path-relative references) is joined
/// onto `current` the way a browser resolves it against the document URL and
/// returned in path-absolute form.
///
/// # Errors
///
/// [`RouterError::MalformedUrl`] when the href contains control characters,
/// cannot be parsed, or is a network-path reference (`//host/path`) to another
/// origin.
pub fn resolve_href(current: &str, href: &str) -> Result<String> {
    if href.chars().any(char::is_control) {
        return Err(RouterError::malformed(href, "control characters are not allowed"));
    }
    if href.starts_with('/') && !href.starts_with("//") {
        return Ok(href.to_string());
    }
    match Url::parse(href) {
        Ok(_) => return Ok(href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(err) => return Err(RouterError::malformed(href, err.to_string())),
    }

    let base = Url::parse(RESOLUTION_BASE)
        .and_then(|root| root.join(current))
        .map_err(|err| RouterError::malformed(current, err.to_string()))?;
    let resolved = base
        .join(href)
        .map_err(|err| RouterError::malformed(href, err.to_string()))?;
    if resolved.origin() != base.origin() {
        return Err(RouterError::malformed(
            href,
            "network-path reference leaves the current origin",
        ));
    }

    let mut out = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = resolved.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    Ok(out)
}

// Stand-in origin for joining path-absolute current URLs.
const RESOLUTION_BASE: &str = "http://router.invalid/";

/// Inverse of [`parse`]: `pathname` + `?query` (only when non-empty) + hash.
///
/// The hash is affixed verbatim, so it should carry its own `#`.
#[must_use]
pub fn serialize(pathname: &str, query: &Query, hash: Option<&str>) -> String {
    let mut out = String::with_capacity(pathname.len() + 16);
    out.push_str(pathname);
    if !query.is_empty() {
        out.push('?');
        out.push_str(&query.to_query_string());
    }
    if let Some(hash) = hash {
        out.push_str(hash);
    }
    out
}

fn from_relative(raw: &str) -> Result<ParsedUrl> {
    if !raw.starts_with('/') {
        return Err(RouterError::malformed(raw, "relative URL must start with '/'"));
    }
    if raw.starts_with("//") {
        return Err(RouterError::malformed(raw, "network-path reference has no routable path"));
    }

    let (rest, hash) = match raw.find('#') {
        Some(pos) => (&raw[..pos], Some(raw[pos..].to_string())),
        None => (raw, None),
    };
    let (pathname, query) = match rest.find('?') {
        Some(pos) => (&rest[..pos], Query::parse(&rest[pos + 1..])),
        None => (rest, Query::new()),
    };

    Ok(ParsedUrl {
        pathname: pathname.to_string(),
        query,
        hash,
    })
}

fn from_absolute(raw: &str, url: &Url) -> Result<ParsedUrl> {
    if url.cannot_be_a_base() {
        return Err(RouterError::malformed(raw, "URL has no hierarchical path"));
    }
    Ok(ParsedUrl {
        pathname: url.path().to_string(),
        query: url.query().map(Query::parse).unwrap_or_default(),
        hash: url.fragment().map(|f| format!("#{f}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        let p = parse("/signup").unwrap();
        assert_eq!(p.pathname, "/signup");
        assert!(p.query.is_empty());
        assert_eq!(p.hash, None);
    }

    #[test]
    fn test_query_and_hash() {
        let p = parse("/login?return=/about#pricing").unwrap();
        assert_eq!(p.pathname, "/login");
        assert_eq!(p.query, Query::from([("return", "/about")]));
        assert_eq!(p.hash.as_deref(), Some("#pricing"));
    }

    #[test]
    fn test_hash_before_question_mark_belongs_to_fragment() {
        let p = parse("/a#frag?not=query").unwrap();
        assert_eq!(p.pathname, "/a");
        assert!(p.query.is_empty());
        assert_eq!(p.hash.as_deref(), Some("#frag?not=query"));
    }

    #[test]
    fn test_trailing_slash_preserved() {
        assert_eq!(parse("/posts/").unwrap().pathname, "/posts/");
    }

    #[test]
    fn test_empty_query_and_empty_fragment() {
        let p = parse("/a?#").unwrap();
        assert!(p.query.is_empty());
        assert_eq!(p.hash.as_deref(), Some("#"));
        assert_eq!(p.to_url_string(), "/a#");
    }

    #[test]
    fn test_absolute_url() {
        let p = parse("https://www.example.com/posts/23/edit?order=desc#top").unwrap();
        assert_eq!(p.pathname, "/posts/23/edit");
        assert_eq!(p.query.get("order"), Some("desc"));
        assert_eq!(p.hash.as_deref(), Some("#top"));
    }

    #[test]
    fn test_absolute_url_without_path() {
        assert_eq!(parse("https://www.example.com").unwrap().pathname, "/");
    }

    #[test]
    fn test_malformed_inputs() {
        for raw in [
            "",
            "posts/42",
            "http://[::1",
            "mailto:someone@example.com",
            "/a\nb",
            "//evil.example/x",
        ] {
            assert!(
                matches!(parse(raw), Err(RouterError::MalformedUrl { .. })),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_round_trip() {
        for raw in [
            "/posts/23/edit?order=desc",
            "/search?q=rust&page=2#results",
            "/?a=1",
            "/deep/path/?x=y#",
            "/login?return=/about#pricing",
            "/x?v=1.0~beta&q=a%20b",
            "/x?name=it's&tag=(new)!",
            "/x?q=%26%3D%23%2B",
        ] {
            assert_eq!(parse(raw).unwrap().to_url_string(), raw);
        }
    }

    #[test]
    fn test_double_slash_is_not_a_pathname() {
        let err = parse("//evil.example/x").unwrap_err();
        assert!(matches!(err, RouterError::MalformedUrl { .. }));
        assert_eq!(parse("/a//b").unwrap().pathname, "/a//b");
    }

    #[test]
    fn test_resolve_href_keeps_routable_forms() {
        assert_eq!(resolve_href("/posts/1", "/signup").unwrap(), "/signup");
        assert_eq!(
            resolve_href("/posts/1", "https://www.example.com/a").unwrap(),
            "https://www.example.com/a"
        );
    }

    #[test]
    fn test_resolve_href_against_current_document() {
        assert_eq!(resolve_href("/posts/1", "?page=2").unwrap(), "/posts/1?page=2");
        assert_eq!(resolve_href("/posts/1?page=2", "#top").unwrap(), "/posts/1?page=2#top");
        assert_eq!(resolve_href("/posts/1", "edit").unwrap(), "/posts/edit");
        assert_eq!(resolve_href("/posts/1/", "edit").unwrap(), "/posts/1/edit");
        assert_eq!(resolve_href("/posts/1/edit", "../2").unwrap(), "/posts/2");
        assert_eq!(
            resolve_href("https://www.example.com/posts/1", "?page=2").unwrap(),
            "/posts/1?page=2"
        );
    }

    #[test]
    fn test_resolve_href_rejects_other_origins_and_garbage() {
        for href in ["//evil.example/x", "http://[::1", "a\tb"] {
            assert!(
                matches!(resolve_href("/", href), Err(RouterError::MalformedUrl { .. })),
                "expected {href:?} to be rejected"
            );
        }
    }
}
