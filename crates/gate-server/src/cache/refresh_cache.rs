//! Timestamped list cache with expire-on-read and sweep-on-write.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::trace;

use crate::cache::keys::CacheKey;
use crate::metrics::CacheMetrics;

struct CacheEntry<V> {
    value: Arc<[V]>,
    updated_at: Instant,
}

impl<V> CacheEntry<V> {
    /// An entry exactly `ttl` old is still fresh.
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.updated_at) > ttl
    }
}

/// Result of [`RefreshCache::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The stored list for the key was replaced.
    pub changed: bool,
    /// Expired entries removed by the sweep that preceded the write.
    pub deleted: usize,
}

/// A named cache of record lists with a fixed TTL.
///
/// Every operation takes the single map lock for its whole
/// read/evict/write sequence, so concurrent handlers never see a half
/// applied sweep.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gate_server::cache::{CacheKey, RefreshCache};
///
/// let cache = RefreshCache::new("flavors", Duration::from_secs(60));
/// let key = CacheKey::from("eastus");
///
/// assert!(cache.fetch_and_update(&key).is_none());
///
/// let outcome = cache.update(key.clone(), vec!["Standard_D2".to_string()]);
/// assert!(outcome.changed);
/// assert_eq!(outcome.deleted, 0);
///
/// let cached = cache.fetch_and_update(&key).unwrap();
/// assert_eq!(&cached[..], ["Standard_D2".to_string()]);
/// ```
pub struct RefreshCache<V> {
    name: String,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
    metrics: CacheMetrics,
}

impl<V> RefreshCache<V>
where
    V: Clone + PartialEq,
{
    /// Creates an empty cache. The TTL cannot be changed afterwards.
    pub fn new(name: impl Into<String>, ttl: Duration) -> Self {
        let name = name.into();
        Self {
            metrics: CacheMetrics::new(&name),
            name,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored list for `key` while it is fresh.
    ///
    /// An expired entry is removed before returning `None`, so it is never
    /// observed again.
    pub fn fetch_and_update(&self, key: &CacheKey) -> Option<Arc<[V]>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(now, self.ttl),
            None => {
                self.metrics.record_miss();
                return None;
            }
        };

        if expired {
            entries.remove(key);
            trace!(cache = %self.name, key = %key, "Expired entry evicted on read");
            self.metrics.record_miss();
            self.metrics.record_eviction("expired", 1);
            self.metrics.update_entry_count(entries.len());
            return None;
        }

        self.metrics.record_hit();
        entries.get(key).map(|entry| Arc::clone(&entry.value))
    }

    /// Sweeps expired entries, then stores `value` under `key` if its content
    /// differs from what is stored.
    ///
    /// Writing content identical to a fresh entry keeps the original
    /// timestamp, so an unchanging upstream list still expires on schedule.
    /// `deleted` counts only sweep removals. It includes `key` itself when
    /// its old entry had expired, but never the replacement of `key`.
    pub fn update(&self, key: CacheKey, value: Vec<V>) -> UpdateOutcome {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let deleted = Self::sweep(&mut entries, now, self.ttl);

        let changed = match entries.get(&key) {
            Some(entry) => entry.value.as_ref() != value.as_slice(),
            None => true,
        };

        if changed {
            entries.insert(
                key,
                CacheEntry {
                    value: Arc::from(value),
                    updated_at: now,
                },
            );
        }

        if deleted > 0 {
            self.metrics.record_eviction("expired", deleted);
        }
        self.metrics.record_update(changed);
        self.metrics.update_entry_count(entries.len());

        UpdateOutcome { changed, deleted }
    }

    /// Removes every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let deleted = Self::sweep(&mut entries, Instant::now(), self.ttl);
        if deleted > 0 {
            self.metrics.record_eviction("expired", deleted);
            self.metrics.update_entry_count(entries.len());
        }
        deleted
    }

    /// Drops the entry for `key`, fresh or not.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let mut entries = self.entries.lock();
        let removed = entries.remove(key).is_some();
        if removed {
            self.metrics.record_eviction("manual", 1);
            self.metrics.update_entry_count(entries.len());
        }
        removed
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        if count > 0 {
            self.metrics.record_eviction("manual", count);
        }
        self.metrics.update_entry_count(0);
        count
    }

    /// Number of stored entries, including ones that expired but were not
    /// swept yet.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn sweep(entries: &mut HashMap<CacheKey, CacheEntry<V>>, now: Instant, ttl: Duration) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, ttl));
        before - entries.len()
    }
}
