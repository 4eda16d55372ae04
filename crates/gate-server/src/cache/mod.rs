//! Keyed refresh cache for provider listings.
//!
//! A [`RefreshCache`] holds one list of records per [`CacheKey`] and decides
//! whether a stored list is still fresh. Handlers ask it first, fetch from the
//! provider on a miss, and push the fresh list back with
//! [`RefreshCache::update`], which also sweeps out expired keys.
//!
//! Named caches live in a [`CacheRegistry`] owned by the application state.

pub mod keys;
pub mod refresh_cache;
pub mod registry;

// Re-exports
pub use keys::CacheKey;
pub use refresh_cache::{RefreshCache, UpdateOutcome};
pub use registry::{CacheError, CacheRegistry, CacheSettings, CacheStats, NamedCache};

/// Name of the cache holding flavor listings, keyed by `[location]`.
pub const FLAVORS_CACHE: &str = "flavors";
