//! Cloud Gate HTTP service.
//!
//! Exposes Azure and OpenStack compute flavors and Azure partitions
//! (resource groups) over REST. Azure flavor lists are kept in a named
//! [`cache::RefreshCache`] keyed by location, so repeated lookups within the
//! cache TTL do not reach the provider.

pub mod cache;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use config::Settings;
pub use error::AppError;
pub use handlers::health::HealthResponse;
pub use server::{create_router, run_server};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_defined() {
        assert!(!version().is_empty());
    }
}
