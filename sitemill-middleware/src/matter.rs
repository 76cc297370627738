//! Front-matter parsing
//!
//! A leading block delimited by `---` lines is parsed as YAML into
//! `file.data` and stripped from the content, so templates receive the
//! metadata as render context and the body renders clean. Files without
//! a block pass through unchanged; an unterminated opening fence is
//! treated as ordinary content.

use sitemill_core::{File, MiddlewareError};

/// Parse and strip a leading front-matter block, if present.
pub fn parse(file: &mut File) -> Result<(), MiddlewareError> {
    let Some((block, body)) = split_front_matter(&file.content) else {
        return Ok(());
    };

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|e| MiddlewareError::Matter {
            path: file.path.clone(),
            reason: e.to_string(),
        })?;
    let parsed = serde_json::to_value(&yaml).map_err(|e| MiddlewareError::Matter {
        path: file.path.clone(),
        reason: e.to_string(),
    })?;
    let body = body.to_string();

    if let serde_json::Value::Object(map) = parsed {
        tracing::trace!(path = %file.path, keys = map.len(), "parsed front-matter");
        for (key, value) in map {
            file.data.insert(key, value);
        }
    }
    file.content = body;
    Ok(())
}

/// Split `content` into (front-matter block, body). Returns `None` when
/// no complete block is present.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---\n")?;
    for (pos, _) in rest.match_indices("\n---") {
        let after = &rest[pos + "\n---".len()..];
        if after.is_empty() {
            return Some((&rest[..pos], after));
        }
        if let Some(body) = after.strip_prefix('\n') {
            return Some((&rest[..pos], body));
        }
    }
    None
}
