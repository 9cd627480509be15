//! Append-only resolution memo
//!
//! Every distinct requested path is resolved at most once per cache. The
//! lookup, the filesystem work on a miss, and the insert all happen inside
//! one critical section, so first-time lookups are serialized process-wide.
//!
//! | State | Meaning |
//! |-------|---------|
//! | absent | never requested |
//! | `Remapped(path)` | a real target exists under the alternate root |
//! | `Unchanged` | requests pass through untouched |
//!
//! Entries are never replaced or evicted.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Outcome recorded for one requested path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum Resolution {
    /// Use this path under the alternate root instead
    Remapped(String),
    /// Use the requested path as is
    Unchanged,
}

impl Resolution {
    /// Whether the request was redirected
    pub fn is_remapped(&self) -> bool {
        matches!(self, Self::Remapped(_))
    }
}

/// Counters describing cache traffic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub remapped: u64,
    pub unchanged: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    remapped: AtomicU64,
    unchanged: AtomicU64,
}

/// Map from requested path to its resolution, guarded by one lock
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: Mutex<HashMap<String, Resolution>>,
    counters: Counters,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the recorded resolution of `key`, computing and recording it
    /// with `compute` on first request.
    ///
    /// `compute` runs while the lock is held, so concurrent requests for the
    /// same key never probe the filesystem twice.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> Resolution
    where
        F: FnOnce() -> Resolution,
    {
        // Values are immutable once inserted, so a poisoned map is still consistent.
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(found) = entries.get(key) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return found.clone();
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let resolution = compute();
        let counter = if resolution.is_remapped() {
            &self.counters.remapped
        } else {
            &self.counters.unchanged
        };
        counter.fetch_add(1, Ordering::Relaxed);

        entries.insert(key.to_string(), resolution.clone());
        resolution
    }

    /// Look up `key` without computing anything
    pub fn get(&self, key: &str) -> Option<Resolution> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Number of distinct paths recorded
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            remapped: self.counters.remapped.load(Ordering::Relaxed),
            unchanged: self.counters.unchanged.load(Ordering::Relaxed),
        }
    }
}
