//! Lazily-parsed structured view over a file's JSON content
//!
//! Replaces an implicit lazy property with an explicit accessor: the
//! caching contract lives in this type instead of language-level property
//! descriptors. Once a value is materialized (by first read or explicit
//! assignment) it is never re-parsed from content, even if the content
//! changes underneath it.

use serde_json::Value;

/// Callback fired once, with the freshly parsed value, on the first
/// successful parse. Never fires for explicitly assigned values.
pub type ParseHook = Box<dyn FnOnce(&Value) + Send + Sync>;

/// Cached structured value derived from a file's text content.
pub struct JsonView {
    cached: Option<Value>,
    on_first_parse: Option<ParseHook>,
}

impl JsonView {
    pub fn new() -> Self {
        Self {
            cached: None,
            on_first_parse: None,
        }
    }

    /// Builder: attach a first-parse hook
    pub fn with_parse_hook(mut self, hook: ParseHook) -> Self {
        self.on_first_parse = Some(hook);
        self
    }

    /// Whether a cached value exists (first read happened, or a value
    /// was assigned).
    pub fn materialized(&self) -> bool {
        self.cached.is_some()
    }

    /// Read the structured value, parsing `content` on the first call.
    /// Subsequent calls return the cached value regardless of `content`.
    pub fn get_mut(&mut self, content: &str) -> Result<&mut Value, serde_json::Error> {
        if self.cached.is_none() {
            let parsed: Value = serde_json::from_str(content)?;
            if let Some(hook) = self.on_first_parse.take() {
                hook(&parsed);
            }
            self.cached = Some(parsed);
        }
        // Cache is guaranteed filled above; Null is never inserted.
        Ok(self.cached.get_or_insert(Value::Null))
    }

    /// Read-only access to the cached value, without triggering a parse.
    pub fn cached(&self) -> Option<&Value> {
        self.cached.as_ref()
    }

    /// Replace the cached value directly. No serialization happens here;
    /// the text content is only rewritten at flush time.
    pub fn set(&mut self, value: Value) {
        self.cached = Some(value);
    }
}

impl Default for JsonView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_read_parses_content() {
        let mut view = JsonView::new();
        let value = view.get_mut(r#"{"name": "Halle"}"#).unwrap();
        assert_eq!(value["name"], json!("Halle"));
        assert!(view.materialized());
    }

    #[test]
    fn test_second_read_ignores_changed_content() {
        let mut view = JsonView::new();
        view.get_mut(r#"{"a": 1}"#).unwrap();
        let value = view.get_mut(r#"{"a": 2}"#).unwrap();
        assert_eq!(value["a"], json!(1));
    }

    #[test]
    fn test_read_after_set_skips_parse() {
        let mut view = JsonView::new();
        view.set(json!({"b": 2}));
        // Content is not even valid JSON; the cache wins.
        let value = view.get_mut("not json at all").unwrap();
        assert_eq!(value["b"], json!(2));
    }

    #[test]
    fn test_invalid_json_surfaces_error() {
        let mut view = JsonView::new();
        assert!(view.get_mut("{nope").is_err());
        assert!(!view.materialized());
    }

    #[test]
    fn test_cached_does_not_parse() {
        let view = JsonView::new();
        assert!(view.cached().is_none());
    }

    mod parse_hook {
        use super::*;

        #[test]
        fn test_fires_once_on_first_parse() {
            let count = Arc::new(AtomicUsize::new(0));
            let seen = count.clone();
            let mut view = JsonView::new().with_parse_hook(Box::new(move |v| {
                assert_eq!(v["k"], json!("v"));
                seen.fetch_add(1, Ordering::SeqCst);
            }));
            view.get_mut(r#"{"k": "v"}"#).unwrap();
            view.get_mut(r#"{"k": "other"}"#).unwrap();
            assert_eq!(count.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn test_does_not_fire_for_assigned_values() {
            let count = Arc::new(AtomicUsize::new(0));
            let seen = count.clone();
            let mut view = JsonView::new().with_parse_hook(Box::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            }));
            view.set(json!({}));
            view.get_mut("ignored").unwrap();
            assert_eq!(count.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn test_does_not_fire_on_failed_parse() {
            let count = Arc::new(AtomicUsize::new(0));
            let seen = count.clone();
            let mut view = JsonView::new().with_parse_hook(Box::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            }));
            assert!(view.get_mut("{nope").is_err());
            assert_eq!(count.load(Ordering::SeqCst), 0);
        }
    }
}
