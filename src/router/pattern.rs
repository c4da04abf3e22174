//! Path pattern compilation.
//!
//! A pattern such as `/posts/:postId/edit` is split on `/` into segments and
//! compiled into one anchored regex:
//!
//! | Segment     | Regex fragment        | Captures                       |
//! |-------------|-----------------------|--------------------------------|
//! | `posts`     | `/posts`              | nothing                        |
//! | `:postId`   | `/([^/]+)`            | exactly one path segment       |
//! | `:path*`    | `(?:/(.*))?`          | every remaining segment        |
//!
//! A single leading `/` is ignored on both the pattern and the candidate
//! path. Matching is case-sensitive, never partial, and never coerces
//! captured values: `"42"` stays a string.

use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::error::{PatternSyntaxReason, Result, RouterError};

/// Maximum number of captures stored inline before spilling to the heap.
/// Client routes rarely carry more than two or three.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured parameters in pattern order.
///
/// Names are shared with the compiled pattern (`Arc<str>`); values are owned
/// because they come from the URL being resolved.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// One parsed pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the candidate segment exactly
    Literal(String),
    /// `:name`, consumes exactly one segment
    Named(Arc<str>),
    /// `:name*`, consumes the rest of the path
    CatchAll(Arc<str>),
}

/// A compiled route pattern.
///
/// Compilation validates the pattern once; matching afterwards is a pure
/// function of the candidate path.
#[derive(Clone)]
pub struct Matcher {
    source: String,
    segments: Vec<Segment>,
    regex: Regex,
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("pattern", &self.source)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Matcher {
    /// Compile a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PatternSyntax`] when a catch-all is not the
    /// final segment, when more than one catch-all is declared, or when a
    /// capture name is empty, duplicated, or not made of `[A-Za-z0-9_]`.
    pub fn compile(pattern: &str) -> Result<Self> {
        let segments = parse_segments(pattern)?;
        let regex = build_regex(pattern, &segments)?;
        Ok(Self {
            source: pattern.to_string(),
            segments,
            regex,
        })
    }

    /// The pattern exactly as it was declared.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern is a lone catch-all (`/:name*`), which matches
    /// every path including `/`.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::CatchAll(_)])
    }

    /// Names of every capture, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Named(n) | Segment::CatchAll(n) => Some(n.as_ref()),
            Segment::Literal(_) => None,
        })
    }

    /// Test `path` against this pattern.
    ///
    /// Returns the captured parameters on success. A catch-all that consumed
    /// zero segments captures the empty string.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ParamVec> {
        let captures = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        let mut group = 1;
        for segment in &self.segments {
            match segment {
                Segment::Named(name) | Segment::CatchAll(name) => {
                    let value = captures
                        .get(group)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default();
                    params.push((Arc::clone(name), value));
                    group += 1;
                }
                Segment::Literal(_) => {}
            }
        }
        Some(params)
    }
}

fn parse_segments(pattern: &str) -> Result<Vec<Segment>> {
    let body = pattern.strip_prefix('/').unwrap_or(pattern);
    let raw: Vec<&str> = body.split('/').collect();
    let mut segments = Vec::with_capacity(raw.len());
    let mut seen: Vec<&str> = Vec::new();

    for (i, part) in raw.iter().enumerate() {
        let Some(capture) = part.strip_prefix(':') else {
            segments.push(Segment::Literal((*part).to_string()));
            continue;
        };

        let (name, catch_all) = match capture.strip_suffix('*') {
            Some(name) => (name, true),
            None => (capture, false),
        };
        validate_name(pattern, name)?;
        if seen.contains(&name) {
            return Err(RouterError::pattern(
                pattern,
                PatternSyntaxReason::DuplicateCaptureName,
            ));
        }
        seen.push(name);

        if catch_all {
            segments.push(Segment::CatchAll(Arc::from(name)));
            if i + 1 != raw.len() {
                let reason = if raw[i + 1..].iter().any(|p| p.starts_with(':') && p.ends_with('*')) {
                    PatternSyntaxReason::MultipleCatchAll
                } else {
                    PatternSyntaxReason::CatchAllNotFinal
                };
                return Err(RouterError::pattern(pattern, reason));
            }
        } else {
            segments.push(Segment::Named(Arc::from(name)));
        }
    }

    Ok(segments)
}

fn validate_name(pattern: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RouterError::pattern(
            pattern,
            PatternSyntaxReason::EmptyCaptureName,
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(RouterError::pattern(
            pattern,
            PatternSyntaxReason::InvalidCaptureName,
        ));
    }
    Ok(())
}

/// Build the anchored regex for a validated segment list.
///
/// The leading `/` is optional on the candidate, mirroring how the pattern
/// itself is read.
fn build_regex(pattern: &str, segments: &[Segment]) -> Result<Regex> {
    let mut re = String::with_capacity(pattern.len() + 16);
    re.push('^');

    let mut first = true;
    for segment in segments {
        let sep = if first { "/?" } else { "/" };
        match segment {
            Segment::Literal(lit) => {
                re.push_str(sep);
                re.push_str(&regex::escape(lit));
            }
            Segment::Named(_) => {
                re.push_str(sep);
                re.push_str("([^/]+)");
            }
            Segment::CatchAll(_) => {
                if first {
                    re.push_str("/?(.*)");
                } else {
                    re.push_str("(?:/(.*))?");
                }
            }
        }
        first = false;
    }

    re.push('$');
    // Literals are escaped and capture names never reach the regex, so this
    // only fails when the compiled program exceeds the engine's size limit.
    Regex::new(&re).map_err(|err| {
        tracing::error!(pattern = %pattern, regex = %re, error = %err, "Pattern regex rejected");
        RouterError::pattern(pattern, PatternSyntaxReason::TooComplex)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
        params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_root_pattern() {
        let m = Matcher::compile("/").unwrap();
        assert!(m.matches("/").is_some());
        assert!(m.matches("/a").is_none());
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let m = Matcher::compile("/signup").unwrap();
        assert!(m.matches("/signup").is_some());
        assert!(m.matches("/SignUp").is_none());
    }

    #[test]
    fn test_trailing_slash_is_significant() {
        let m = Matcher::compile("/posts").unwrap();
        assert!(m.matches("/posts/").is_none());
    }

    #[test]
    fn test_named_capture_stays_a_string() {
        let m = Matcher::compile("/posts/:postId").unwrap();
        let params = m.matches("/posts/42").unwrap();
        assert_eq!(param(&params, "postId"), Some("42"));
        assert!(m.matches("/posts/42/edit").is_none());
        assert!(m.matches("/posts").is_none());
    }

    #[test]
    fn test_catch_all_matches_root_and_deep_paths() {
        let m = Matcher::compile("/:path*").unwrap();
        assert!(m.is_universal());
        assert_eq!(param(&m.matches("/").unwrap(), "path"), Some(""));
        assert_eq!(
            param(&m.matches("/a/b/c").unwrap(), "path"),
            Some("a/b/c")
        );
    }

    #[test]
    fn test_catch_all_after_prefix() {
        let m = Matcher::compile("/files/:rest*").unwrap();
        assert!(!m.is_universal());
        assert_eq!(param(&m.matches("/files").unwrap(), "rest"), Some(""));
        assert_eq!(
            param(&m.matches("/files/a/b.txt").unwrap(), "rest"),
            Some("a/b.txt")
        );
        assert!(m.matches("/filesystem").is_none());
    }

    #[test]
    fn test_literal_regex_metacharacters_are_escaped() {
        let m = Matcher::compile("/a.b/(x)").unwrap();
        assert!(m.matches("/a.b/(x)").is_some());
        assert!(m.matches("/aXb/(x)").is_none());
    }

    #[test]
    fn test_catch_all_must_be_final() {
        let err = Matcher::compile("/:path*/edit").unwrap_err();
        assert!(matches!(
            err,
            RouterError::PatternSyntax {
                reason: PatternSyntaxReason::CatchAllNotFinal,
                ..
            }
        ));
    }

    #[test]
    fn test_two_catch_alls_rejected() {
        let err = Matcher::compile("/:a*/:b*").unwrap_err();
        assert!(matches!(
            err,
            RouterError::PatternSyntax {
                reason: PatternSyntaxReason::MultipleCatchAll,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_capture_names_rejected() {
        assert!(Matcher::compile("/:").is_err());
        assert!(Matcher::compile("/:*").is_err());
        assert!(Matcher::compile("/:a-b").is_err());
        assert!(Matcher::compile("/:id/:id").is_err());
    }

    #[test]
    fn test_param_names_in_order() {
        let m = Matcher::compile("/users/:userId/posts/:postId").unwrap();
        let names: Vec<_> = m.param_names().collect();
        assert_eq!(names, vec!["userId", "postId"]);
    }
}
