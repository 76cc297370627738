//! Errors shared across the sitemill workspace
//!
//! Failures here come from malformed input or bad configuration, never
//! from transient conditions, so nothing is retried internally. A parse
//! error aborts the failing file's pipeline pass and is surfaced through
//! the host's own error channel.

use crate::Phase;
use thiserror::Error;

/// Error type for middleware operations
#[derive(Debug, Error)]
pub enum MiddlewareError {
    /// Content was not valid JSON when first read through the structured view.
    #[error("failed to parse `{path}` as JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A front-matter block was present but could not be parsed.
    #[error("invalid front-matter in `{path}`: {reason}")]
    Matter { path: String, reason: String },

    /// A path selector supplied at construction time did not compile.
    #[error("invalid pattern for `{option}`: {source}")]
    Pattern {
        option: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The configured unescape phase is not one the escaper supports.
    #[error("unsupported unescape phase `{0}`; use postRender or preWrite")]
    UnescapePhase(Phase),

    /// A structured read or write was attempted on a file the JSON view
    /// was never installed on.
    #[error("`{path}` has no JSON view installed")]
    ViewNotInstalled { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = MiddlewareError::Json {
            path: "a.json".to_string(),
            source,
        };
        assert!(err.to_string().contains("a.json"));
    }

    #[test]
    fn test_unescape_phase_message() {
        let err = MiddlewareError::UnescapePhase(Phase::OnLoad);
        assert!(err.to_string().contains("onLoad"));
    }
}
