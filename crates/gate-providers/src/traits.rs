//! Provider trait definitions.

use async_trait::async_trait;
use gate_core::PartitionRequest;

use crate::azure::{AzureVmSize, ResourceGroup};
use crate::credentials::{AzureCredentials, OpenStackCredentials};
use crate::error::ProviderError;
use crate::openstack::NovaFlavor;

/// Operations the gateway needs from Azure Resource Manager.
///
/// The server only talks to this trait, so tests substitute an in-memory
/// implementation for [`AzureRestClient`](crate::AzureRestClient).
#[async_trait]
pub trait AzureProvider: Send + Sync {
    /// Lists the VM sizes available in `location`.
    async fn list_sizes(
        &self,
        creds: &AzureCredentials,
        location: &str,
    ) -> Result<Vec<AzureVmSize>, ProviderError>;

    /// Lists every resource group of the subscription.
    async fn list_resource_groups(
        &self,
        creds: &AzureCredentials,
    ) -> Result<Vec<ResourceGroup>, ProviderError>;

    /// Fetches one resource group, `None` when it does not exist.
    async fn get_resource_group(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<Option<ResourceGroup>, ProviderError>;

    /// Creates the resource group of a new partition and starts its
    /// deployment. Returns the group as created.
    async fn create_partition(
        &self,
        creds: &AzureCredentials,
        request: &PartitionRequest,
    ) -> Result<ResourceGroup, ProviderError>;

    /// Starts deletion of a resource group and returns the provider's acknowledgement.
    ///
    /// # Errors
    ///
    /// - `ProviderError::NotFound` if the group does not exist
    async fn delete_resource_group(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<String, ProviderError>;

    /// Returns the name of this provider, used for logging.
    fn name(&self) -> &str {
        "azure"
    }
}

/// Operations the gateway needs from OpenStack Compute.
#[async_trait]
pub trait OpenStackProvider: Send + Sync {
    /// Lists the flavors visible to the authenticated project.
    async fn list_flavors(
        &self,
        creds: &OpenStackCredentials,
    ) -> Result<Vec<NovaFlavor>, ProviderError>;

    fn name(&self) -> &str {
        "openstack"
    }
}
