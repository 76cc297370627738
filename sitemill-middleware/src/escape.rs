//! Delimiter escaping for nested template passes
//!
//! C-style-ish macros: a double-percent delimiter like `{%%= foo %}` or
//! `<%%- bar %>` marks an expression the *next* template pass should see
//! literally. At load time the opening sequence is swapped for a sentinel
//! the render engine ignores; afterwards the sentinel is swapped back
//! with one escaping level removed, so `{%%=` comes out as `{%=`.
//!
//! Both passes are total: stray or partially-formed delimiter fragments
//! are simply not matched and flow through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `{` or `<` followed by `%%` and an optional evaluation sigil.
static DELIM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([{<])%%([=-]?)").unwrap());

/// Matches the sentinels [`escape`] inserts, capturing bracket and sigil.
static SENTINEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__ESC_([{<])([=-]?)DELIM__").unwrap());

const BODY_TAG: &str = "{% body %}";
const BODY_SENTINEL: &str = "__ESC_BODY__";

/// Neutralize double-percent delimiters so a render pass leaves them
/// alone. The literal `{% body %}` placeholder is round-tripped through
/// its own sentinel so layout body substitution is not disturbed either.
pub fn escape(content: &str) -> String {
    let content = content.replace(BODY_TAG, BODY_SENTINEL);
    DELIM_RE
        .replace_all(&content, "__ESC_${1}${2}DELIM__")
        .into_owned()
}

/// Inverse pass: every sentinel becomes bracket + `%` + sigil, and the
/// body sentinel is restored to its literal form. Content without
/// sentinels is returned unchanged.
pub fn unescape(content: &str) -> String {
    SENTINEL_RE
        .replace_all(content, "${1}%${2}")
        .replace(BODY_SENTINEL, BODY_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_delimiters_is_identity() {
        let text = "plain text, no templates here";
        assert_eq!(escape(text), text);
        assert_eq!(unescape(text), text);
    }

    #[test]
    fn test_single_percent_untouched() {
        let text = "a {%= name %} b <%- other %> c";
        assert_eq!(escape(text), text);
    }

    #[test]
    fn test_curly_equals_round_trip() {
        let escaped = escape("a {%= name %} b {%%= foo %} c");
        assert!(!escaped.contains("{%%="));
        assert!(escaped.contains("{%= name %}"));
        assert_eq!(unescape(&escaped), "a {%= name %} b {%= foo %} c");
    }

    #[test]
    fn test_angle_bracket_round_trip() {
        let escaped = escape("a <%= name %> b <%%= foo %> c");
        assert_eq!(unescape(&escaped), "a <%= name %> b <%= foo %> c");
    }

    #[test]
    fn test_dash_sigil_round_trip() {
        let escaped = escape("x <%%- raw %> y");
        assert!(!escaped.contains("%%"));
        assert_eq!(unescape(&escaped), "x <%- raw %> y");
    }

    #[test]
    fn test_bare_double_percent_round_trip() {
        let escaped = escape("open {%% close %}");
        assert!(!escaped.contains("{%%"));
        assert_eq!(unescape(&escaped), "open {% close %}");
    }

    #[test]
    fn test_stray_closing_delimiter_passes_through() {
        let text = "a <%= name %> %> c";
        assert_eq!(unescape(&escape(text)), text);
    }

    #[test]
    fn test_every_occurrence_is_escaped() {
        let escaped = escape("{%%= a %} and {%%= b %}");
        assert_eq!(escaped.matches("__ESC_").count(), 2);
        assert_eq!(unescape(&escaped), "{%= a %} and {%= b %}");
    }

    #[test]
    fn test_body_placeholder_survives() {
        let escaped = escape("header {% body %} footer");
        assert!(!escaped.contains(BODY_TAG));
        assert_eq!(unescape(&escaped), "header {% body %} footer");
    }

    #[test]
    fn test_mixed_brackets_keep_their_shape() {
        let escaped = escape("{%%= a %} <%%= b %>");
        assert_eq!(unescape(&escaped), "{%= a %} <%= b %>");
    }
}
