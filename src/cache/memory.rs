//! In-process render cache backed by `DashMap`.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::RenderCache;
use crate::core::Result;

#[derive(Debug, Clone)]
struct Entry {
    markup: String,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Render cache living in process memory.
///
/// Expired entries are dropped lazily on the next read of their key.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<String, Entry>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries and statistics.
    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// (hits, misses) since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> (usize, usize) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }

    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let (hits, misses) = self.stats();
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(now) {
                return Some(entry.markup.clone());
            }
        } else {
            return None;
        }
        // Guard dropped above; re-check so a concurrent fresh write is not removed.
        self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        None
    }
}

impl RenderCache for InMemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let found = self.lookup(key);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        Ok(found)
    }

    fn put(&self, key: &str, markup: &str, ttl: Duration) -> Result<()> {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries.insert(
            key.to_string(),
            Entry {
                markup: markup.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
