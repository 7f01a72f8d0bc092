//! Process-wide cache for product rating aggregates.
//!
//! Services receive the cache as a [`RatingCache`] so tests can swap the
//! backend; the server shares one [`InMemoryRatingCache`] across workers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::rating::RatingAggregate;

/// Cache key under which the rating aggregate of a product is stored.
pub fn rating_cache_key(product_id: i32) -> String {
    format!("average_rating_{product_id}")
}

/// Key-value cache for rating aggregates.
///
/// Entries never expire on their own; writers must call
/// [`RatingCache::invalidate`] whenever the underlying reviews change.
pub trait RatingCache: Send + Sync {
    /// Return the cached aggregate stored under `key`.
    fn get(&self, key: &str) -> Option<RatingAggregate>;
    /// Store `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: RatingAggregate);
    /// Drop the entry stored under `key`, if any.
    fn invalidate(&self, key: &str);

    /// Return the entry stored under `key`, computing and storing it with
    /// `load` on a miss. Failed loads leave the cache untouched.
    fn get_or_insert_with<F, E>(&self, key: &str, load: F) -> Result<RatingAggregate, E>
    where
        Self: Sized,
        F: FnOnce() -> Result<RatingAggregate, E>,
    {
        if let Some(value) = self.get(key) {
            log::debug!("rating cache hit for {key}");
            return Ok(value);
        }

        log::debug!("rating cache miss for {key}");
        let value = load()?;
        self.set(key, value);
        Ok(value)
    }
}

/// Rating cache backend shared by the HTTP handlers.
pub type SharedRatingCache = InMemoryRatingCache;

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,
    /// Number of lookups that found nothing.
    pub misses: u64,
    /// Number of entries currently cached.
    pub entries: usize,
}

/// [`RatingCache`] backed by a lock-protected map.
#[derive(Debug, Default)]
pub struct InMemoryRatingCache {
    entries: RwLock<HashMap<String, RatingAggregate>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InMemoryRatingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the hit/miss counters and the current size.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.read().len(),
        }
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, RatingAggregate>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, RatingAggregate>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RatingCache for InMemoryRatingCache {
    fn get(&self, key: &str) -> Option<RatingAggregate> {
        let value = self.read().get(key).copied();
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    fn set(&self, key: &str, value: RatingAggregate) {
        self.write().insert(key.to_string(), value);
    }

    fn invalidate(&self, key: &str) {
        self.write().remove(key);
    }
}
