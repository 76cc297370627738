//! JSON view synchronization between load and write phases
//!
//! `install` runs at load time for JSON-like files: it snapshots the raw
//! content and attaches the lazy structured view, optionally wiring a
//! first-parse hook that merges config data into the shared cache.
//! `flush` runs at pre-write time and re-serializes the structured value
//! into the content buffer, unless another stage rewrote the text
//! directly since load, in which case the last direct writer wins.

use serde_json::Value;
use sitemill_core::{File, MiddlewareError, ParseHook, SharedData};

/// Install the JSON view on `file`. When `config_name` is set and the
/// parsed object carries `{ <config_name>: { data: {...} } }`, that
/// nested map is merged into `shared` on first parse.
pub fn install(
    file: &mut File,
    shared: &SharedData,
    config_name: Option<&str>,
) -> Result<(), MiddlewareError> {
    file.snapshot();
    let hook = config_name.map(|name| {
        let shared = shared.clone();
        let name = name.to_string();
        Box::new(move |value: &Value| {
            let nested = value
                .get(&name)
                .and_then(|v| v.get("data"))
                .and_then(Value::as_object);
            if let Some(data) = nested {
                tracing::debug!(config = %name, "merging config data into shared cache");
                shared.merge(data);
            }
        }) as ParseHook
    });
    file.install_json_view(hook);
    Ok(())
}

/// Write the cached structured value back into `file.content` as
/// 2-space-indented JSON with a trailing newline. No-op when the view
/// was never installed or never materialized, or when the content was
/// rewritten directly since load.
pub fn flush(file: &mut File) -> Result<(), MiddlewareError> {
    if !file.json_materialized() {
        return Ok(());
    }
    if !file.content_untouched() {
        tracing::debug!(path = %file.path, "content edited since load; keeping direct edit");
        return Ok(());
    }
    let rendered = match file.cached_json() {
        Some(value) => {
            serde_json::to_string_pretty(value).map_err(|source| MiddlewareError::Json {
                path: file.path.clone(),
                source,
            })?
        }
        None => return Ok(()),
    };
    file.content = rendered;
    file.content.push('\n');
    Ok(())
}
