//! Registry of named caches.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cache::refresh_cache::RefreshCache;

/// Errors of the cache registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache '{name}' holds {found}, requested as {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown cache: {0}")]
    UnknownCache(String),
}

/// TTL settings for the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// TTL for caches without an explicit entry (default: 60)
    pub default_ttl_seconds: u64,
    /// Per-cache TTL overrides, by cache name
    pub ttl_seconds: HashMap<String, u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl_seconds: 60,
            ttl_seconds: HashMap::from([(super::FLAVORS_CACHE.to_string(), 60)]),
        }
    }
}

impl CacheSettings {
    /// TTL configured for `name`.
    pub fn ttl_for(&self, name: &str) -> Duration {
        let seconds = self
            .ttl_seconds
            .get(name)
            .copied()
            .unwrap_or(self.default_ttl_seconds);
        Duration::from_secs(seconds)
    }
}

/// Snapshot of one cache for the admin endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub name: String,
    pub entries: usize,
    pub ttl_seconds: u64,
    pub hit_rate: f64,
}

/// Type-erased view of a [`RefreshCache`], used for registry wide operations.
pub trait NamedCache: Send + Sync {
    fn name(&self) -> &str;
    fn ttl(&self) -> Duration;
    fn entry_count(&self) -> usize;
    fn hit_rate(&self) -> f64;
    fn purge_expired(&self) -> usize;
    fn clear(&self) -> usize;
    /// Type name of the cached records.
    fn record_type(&self) -> &'static str;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<V> NamedCache for RefreshCache<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        RefreshCache::name(self)
    }

    fn ttl(&self) -> Duration {
        RefreshCache::ttl(self)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn hit_rate(&self) -> f64 {
        self.metrics().hit_rate()
    }

    fn purge_expired(&self) -> usize {
        RefreshCache::purge_expired(self)
    }

    fn clear(&self) -> usize {
        RefreshCache::clear(self)
    }

    fn record_type(&self) -> &'static str {
        type_name::<V>()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Named caches created on first use and kept until the registry is dropped.
///
/// The registry is built at startup and shared through the application
/// state. Tests build their own instance.
///
/// # Examples
///
/// ```
/// use gate_server::cache::{CacheKey, CacheRegistry, CacheSettings};
///
/// let registry = CacheRegistry::new(CacheSettings::default());
/// let flavors = registry.cache::<String>("flavors").unwrap();
/// flavors.update(CacheKey::from("eastus"), vec!["Standard_D2".to_string()]);
///
/// let again = registry.cache::<String>("flavors").unwrap();
/// assert_eq!(again.len(), 1);
/// assert!(registry.cache::<u32>("flavors").is_err());
/// ```
pub struct CacheRegistry {
    settings: CacheSettings,
    caches: RwLock<HashMap<String, Arc<dyn NamedCache>>>,
}

impl CacheRegistry {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            settings,
            caches: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Returns the cache called `name`, creating it with its configured TTL
    /// if needed.
    ///
    /// # Errors
    ///
    /// - `CacheError::TypeMismatch` if `name` already holds another record type
    pub fn cache<V>(&self, name: &str) -> Result<Arc<RefreshCache<V>>, CacheError>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        if let Some(existing) = self.caches.read().get(name) {
            return downcast(name, Arc::clone(existing));
        }

        let mut caches = self.caches.write();
        let entry = caches.entry(name.to_string()).or_insert_with(|| {
            let ttl = self.settings.ttl_for(name);
            info!(cache = %name, ttl_secs = ttl.as_secs(), "Cache created");
            let cache: Arc<dyn NamedCache> = Arc::new(RefreshCache::<V>::new(name, ttl));
            cache
        });

        downcast(name, Arc::clone(entry))
    }

    /// Names of the caches created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn stats(&self) -> Vec<CacheStats> {
        let mut stats: Vec<CacheStats> = self
            .caches
            .read()
            .values()
            .map(|cache| CacheStats {
                name: cache.name().to_string(),
                entries: cache.entry_count(),
                ttl_seconds: cache.ttl().as_secs(),
                hit_rate: cache.hit_rate(),
            })
            .collect();
        stats.sort_by(|a, b| a.name.cmp(&b.name));
        stats
    }

    /// Empties the cache called `name` and returns the number of dropped entries.
    pub fn clear(&self, name: &str) -> Result<usize, CacheError> {
        let cache = self
            .caches
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| CacheError::UnknownCache(name.to_string()))?;
        Ok(cache.clear())
    }

    /// Empties every cache and returns the total number of dropped entries.
    pub fn clear_all(&self) -> usize {
        self.snapshot().iter().map(|cache| cache.clear()).sum()
    }

    /// Sweeps expired entries from every cache.
    pub fn purge_expired(&self) -> usize {
        self.snapshot().iter().map(|cache| cache.purge_expired()).sum()
    }

    /// Clones the cache handles so per-cache locks are never taken under the registry lock.
    fn snapshot(&self) -> Vec<Arc<dyn NamedCache>> {
        self.caches.read().values().cloned().collect()
    }
}

fn downcast<V>(name: &str, cache: Arc<dyn NamedCache>) -> Result<Arc<RefreshCache<V>>, CacheError>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    let found = cache.record_type();
    cache
        .into_any()
        .downcast::<RefreshCache<V>>()
        .map_err(|_| CacheError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<V>(),
            found,
        })
}
