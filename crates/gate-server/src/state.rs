//! Application state.

use std::sync::Arc;

use gate_core::Flavor;
use gate_providers::{AzureProvider, OpenStackProvider};

use crate::cache::{CacheError, CacheRegistry, FLAVORS_CACHE, RefreshCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    caches: Arc<CacheRegistry>,
    azure: Arc<dyn AzureProvider>,
    openstack: Arc<dyn OpenStackProvider>,
}

impl AppState {
    pub fn new(
        caches: Arc<CacheRegistry>,
        azure: Arc<dyn AzureProvider>,
        openstack: Arc<dyn OpenStackProvider>,
    ) -> Self {
        Self {
            caches,
            azure,
            openstack,
        }
    }

    pub fn caches(&self) -> &CacheRegistry {
        &self.caches
    }

    pub fn azure(&self) -> &dyn AzureProvider {
        self.azure.as_ref()
    }

    pub fn openstack(&self) -> &dyn OpenStackProvider {
        self.openstack.as_ref()
    }

    /// The flavor cache, keyed by `[location]`.
    pub fn flavors_cache(&self) -> Result<Arc<RefreshCache<Flavor>>, CacheError> {
        self.caches.cache::<Flavor>(FLAVORS_CACHE)
    }
}
