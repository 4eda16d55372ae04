//! Per-cache metrics recording.

use metrics::{counter, gauge};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Describes the cache metrics. Call once at startup.
pub fn register_cache_metrics() {
    metrics::describe_counter!("gate_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("gate_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "gate_cache_evictions_total",
        "Total number of entries removed from a cache"
    );
    metrics::describe_counter!(
        "gate_cache_updates_total",
        "Total number of cache writes, labelled by whether content changed"
    );
    metrics::describe_gauge!("gate_cache_entries", "Current number of entries in a cache");
}

/// Metrics recorder bound to one named cache.
///
/// Keeps its own hit/miss counters so the admin endpoint can report a hit
/// rate without reading the exporter.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    cache: Arc<str>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new(cache: &str) -> Self {
        Self {
            cache: Arc::from(cache),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    fn label(&self) -> String {
        self.cache.to_string()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("gate_cache_hits_total", "cache" => self.label()).increment(1);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("gate_cache_misses_total", "cache" => self.label()).increment(1);
    }

    /// Records `count` removals. `reason` is `expired` or `manual`.
    pub fn record_eviction(&self, reason: &'static str, count: usize) {
        counter!(
            "gate_cache_evictions_total",
            "cache" => self.label(),
            "reason" => reason
        )
        .increment(count as u64);
    }

    pub fn record_update(&self, changed: bool) {
        counter!(
            "gate_cache_updates_total",
            "cache" => self.label(),
            "changed" => if changed { "true" } else { "false" }
        )
        .increment(1);
    }

    pub fn update_entry_count(&self, count: usize) {
        gauge!("gate_cache_entries", "cache" => self.label()).set(count as f64);
    }

    /// Hit rate since creation, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
