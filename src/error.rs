//! Router error taxonomy.
//!
//! Every failure in this crate is local and synchronous: matching is pure and
//! deterministic, so nothing here is ever retried. Callers decide how (and
//! whether) to render a propagated error.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;

/// Errors raised while declaring routes, parsing URLs, or resolving locations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A declared pattern is not well formed
    ///
    /// Raised at route-table construction time. This is always an authoring
    /// bug in the route declaration, never a runtime condition.
    #[error("invalid route pattern '{pattern}': {reason}")]
    PatternSyntax {
        /// The offending pattern as declared
        pattern: String,
        /// What is wrong with it
        reason: PatternSyntaxReason,
    },

    /// Resolution reached the end of the table without a match
    ///
    /// Declare a universal catch-all (`/:path*`) last to turn this into a
    /// renderable "not found" unit.
    #[error("no route matched path '{path}'")]
    NoRouteMatched {
        /// The pathname that was being resolved
        path: String,
    },

    /// A URL string could not be parsed into a location
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl {
        /// The raw input
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Strict mode is enabled and the table does not end in a catch-all
    #[error("route table has no universal fallback; declare '/:path*' last")]
    MissingFallback,

    /// The document origin handed to the link interceptor is not an absolute URL
    #[error("invalid document origin '{origin}'")]
    InvalidOrigin {
        /// The origin string as supplied
        origin: String,
    },
}

/// Reason attached to [`RouterError::PatternSyntax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternSyntaxReason {
    #[error("catch-all segment must be the final segment")]
    CatchAllNotFinal,
    #[error("at most one catch-all segment is allowed")]
    MultipleCatchAll,
    #[error("capture segment has an empty name")]
    EmptyCaptureName,
    #[error("capture names may only contain ASCII letters, digits, and '_'")]
    InvalidCaptureName,
    #[error("capture name is declared twice")]
    DuplicateCaptureName,
    #[error("pattern is too large to compile")]
    TooComplex,
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, reason: PatternSyntaxReason) -> Self {
        RouterError::PatternSyntax {
            pattern: pattern.to_string(),
            reason,
        }
    }

    pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
        RouterError::MalformedUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
