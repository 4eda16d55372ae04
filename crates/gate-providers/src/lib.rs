//! # Gate Providers
//!
//! Clients for the cloud APIs behind Cloud Gate.
//!
//! Every call takes its credentials explicitly. A client only owns endpoint
//! settings and a connection pool, so one instance is shared by all requests.
//!
//! ## Example
//!
//! ```ignore
//! use gate_providers::{AzureConfig, AzureCredentials, AzureProvider, AzureRestClient};
//!
//! let client = AzureRestClient::new(AzureConfig::default())?;
//! let creds = AzureCredentials::new("sub-id", "tenant-id", "app-id", "secret");
//!
//! let sizes = client.list_sizes(&creds, "eastus").await?;
//! ```

pub mod azure;
pub mod credentials;
pub mod error;
pub mod openstack;
pub mod traits;

// Re-exports
pub use azure::{AzureConfig, AzureRestClient, AzureVmSize, ResourceGroup};
pub use credentials::{AzureCredentials, OpenStackCredentials};
pub use error::ProviderError;
pub use openstack::{NovaFlavor, OpenStackConfig, OpenStackRestClient};
pub use traits::{AzureProvider, OpenStackProvider};

// Re-export gate_core for consumers
pub use gate_core;
