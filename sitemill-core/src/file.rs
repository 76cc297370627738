//! The file object flowing through the pipeline
//!
//! Each file carries its path, a mutable UTF-8 content buffer, and the
//! context `data` map handed to templates at render time. Files whose
//! path matches the JSON selector additionally get a content snapshot
//! and a [`JsonView`] installed at load time; for everything else those
//! fields are never created.

use crate::{JsonView, MiddlewareError, ParseHook, Phase};
use serde_json::{Map, Value};

/// Unit of work in the pipeline.
pub struct File {
    /// Path identifying the file; its extension drives selector matching.
    pub path: String,
    /// Mutable text buffer. Already in memory; this crate does no I/O.
    pub content: String,
    /// Context map populated by front-matter, passed to templates.
    pub data: Map<String, Value>,
    /// Phases that have run at least one handler against this file.
    pub handled: Vec<Phase>,
    original_content: Option<String>,
    json: Option<JsonView>,
}

impl File {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            data: Map::new(),
            handled: Vec::new(),
            original_content: None,
            json: None,
        }
    }

    // ========== Snapshot ==========

    /// Snapshot the current content. Set at most once per load; later
    /// calls are no-ops so the load-time snapshot is never clobbered.
    pub fn snapshot(&mut self) {
        if self.original_content.is_none() {
            self.original_content = Some(self.content.clone());
        }
    }

    pub fn original_content(&self) -> Option<&str> {
        self.original_content.as_deref()
    }

    /// Whether the content still equals the load-time snapshot. `false`
    /// when no snapshot exists.
    pub fn content_untouched(&self) -> bool {
        self.original_content
            .as_deref()
            .is_some_and(|original| original == self.content)
    }

    /// Reset snapshot and view, as happens when a file re-enters the
    /// load phase.
    pub fn reload(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.original_content = None;
        self.json = None;
        self.handled.clear();
    }

    // ========== JSON view ==========

    /// Install a JSON view if none is present yet.
    pub fn install_json_view(&mut self, hook: Option<ParseHook>) {
        if self.json.is_none() {
            let mut view = JsonView::new();
            if let Some(hook) = hook {
                view = view.with_parse_hook(hook);
            }
            self.json = Some(view);
        }
    }

    pub fn has_json_view(&self) -> bool {
        self.json.is_some()
    }

    /// Whether the view holds a cached value (first read happened or a
    /// value was assigned).
    pub fn json_materialized(&self) -> bool {
        self.json.as_ref().is_some_and(JsonView::materialized)
    }

    /// Structured read/write access; parses the content on first use.
    pub fn json_mut(&mut self) -> Result<&mut Value, MiddlewareError> {
        let path = self.path.clone();
        match self.json.as_mut() {
            Some(view) => view
                .get_mut(&self.content)
                .map_err(|source| MiddlewareError::Json { path, source }),
            None => Err(MiddlewareError::ViewNotInstalled { path }),
        }
    }

    /// Replace the cached structured value without touching the content;
    /// the text is only rewritten at flush time.
    pub fn set_json(&mut self, value: Value) -> Result<(), MiddlewareError> {
        match self.json.as_mut() {
            Some(view) => {
                view.set(value);
                Ok(())
            }
            None => Err(MiddlewareError::ViewNotInstalled {
                path: self.path.clone(),
            }),
        }
    }

    /// The cached structured value, if any, without triggering a parse.
    pub fn cached_json(&self) -> Option<&Value> {
        self.json.as_ref().and_then(JsonView::cached)
    }
}
