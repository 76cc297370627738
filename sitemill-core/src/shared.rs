//! Process-wide shared data cache
//!
//! An explicitly injected handle rather than an ambient global, so tests
//! (and embedders running several pipelines) can supply isolated
//! instances. Merging is the only cross-file interaction in the
//! workspace and runs under the mutex; last merge wins.

use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, PoisonError};

/// Cheap-to-clone handle to a shared key/value cache.
#[derive(Clone, Default)]
pub struct SharedData {
    inner: Arc<Mutex<Map<String, Value>>>,
}

impl SharedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `incoming` into the cache. Nested objects merge key-by-key
    /// (shallow-recursive); any other value, arrays included, overwrites
    /// the existing entry wholesale.
    pub fn merge(&self, incoming: &Map<String, Value>) {
        let mut cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        merge_into(&mut cache, incoming);
    }

    /// Clone out a single value.
    pub fn get(&self, key: &str) -> Option<Value> {
        let cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(key).cloned()
    }

    /// Clone out the whole cache, e.g. for handing to a render context.
    pub fn snapshot(&self) -> Map<String, Value> {
        let cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        cache.clone()
    }
}

fn merge_into(dest: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, value) in src {
        match (dest.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                dest.insert(key.clone(), value.clone());
            }
        }
    }
}
