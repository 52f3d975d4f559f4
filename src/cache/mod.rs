//! Render cache for widget output.
//!
//! Widgets declaring [`RenderMode::Cached`](crate::widget::RenderMode::Cached) are served
//! from a [`RenderCache`]. A hit returns the stored container markup byte for byte, without
//! invoking the widget and without allocating a container id; a miss renders, stores the
//! result with the widget's TTL and returns it.
//!
//! The cache itself is a collaborator: [`InMemoryCache`] covers single-process
//! deployments and tests, anything else (shared stores, framework caches) plugs in
//! through the trait.
//!
//! # Cache Keys
//!
//! Keys are `arrilot.widgets.` followed by the hex SHA-256 of the canonical JSON document
//! `{"args": [...], "class": "...", "params": {...}}`. Object keys are sorted at every depth
//! before hashing, whatever map ordering `serde_json` was built with, so equal inputs always
//! hash equally and any differing parameter gives a different key.

mod memory;

pub use memory::InMemoryCache;

use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::constants::CACHE_KEY_PREFIX;
use crate::core::Result;
use crate::resolver::WidgetClass;
use crate::widget::WidgetConfig;

/// Key-value store for rendered widget markup.
///
/// Implementations must tolerate concurrent callers. `get` returns the latest stored,
/// unexpired value or `None`; concurrent writers to one key resolve last-write-wins.
pub trait RenderCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&self, key: &str, markup: &str, ttl: Duration) -> Result<()>;

    fn forget(&self, key: &str) -> Result<()>;
}

/// Derive the cache key for one render of `class`.
pub fn cache_key(class: &WidgetClass, params: &WidgetConfig, args: &[Value]) -> String {
    let document = canonical(&json!({
        "class": class.as_str(),
        "params": params.as_map(),
        "args": args,
    }));

    let mut hasher = Sha256::new();
    hasher.update(document.to_string().as_bytes());
    format!("{CACHE_KEY_PREFIX}{}", hex::encode(hasher.finalize()))
}

/// Copy of `value` with object keys inserted in sorted order at every level.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k.clone(), canonical(v))).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}
