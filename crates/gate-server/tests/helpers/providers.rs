//! In-memory providers that count calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gate_providers::azure::ResourceGroupProperties;
use gate_providers::gate_core::PartitionRequest;
use parking_lot::Mutex;
use gate_providers::{
    AzureCredentials, AzureProvider, AzureVmSize, NovaFlavor, OpenStackCredentials,
    OpenStackProvider, ProviderError, ResourceGroup,
};

pub fn vm_size(name: &str, cores: u32, memory_mb: u64) -> AzureVmSize {
    AzureVmSize {
        name: name.to_string(),
        number_of_cores: cores,
        memory_in_mb: memory_mb,
        os_disk_size_in_mb: 1_047_552,
        resource_disk_size_in_mb: 8192,
        max_data_disk_count: 4,
    }
}

pub fn resource_group(name: &str, state: &str) -> ResourceGroup {
    ResourceGroup {
        id: Some(format!("/subscriptions/sub-1/resourceGroups/{}", name)),
        name: Some(name.to_string()),
        location: Some("eastus".to_string()),
        tags: None,
        properties: Some(ResourceGroupProperties {
            provisioning_state: Some(state.to_string()),
        }),
    }
}

#[derive(Clone)]
pub struct FakeAzure {
    pub sizes: Vec<AzureVmSize>,
    pub groups: Vec<ResourceGroup>,
    pub fail_with: Option<u16>,
    pub size_calls: Arc<AtomicUsize>,
    pub created: Arc<Mutex<Vec<PartitionRequest>>>,
}

impl Default for FakeAzure {
    fn default() -> Self {
        Self {
            sizes: vec![
                vm_size("Standard_D2s_v3", 2, 8192),
                vm_size("Standard_D4s_v3", 4, 16384),
            ],
            groups: vec![
                resource_group("workflow-a", "Succeeded"),
                resource_group("workflow-b", "Deleting"),
            ],
            fail_with: None,
            size_calls: Arc::new(AtomicUsize::new(0)),
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeAzure {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn size_calls(&self) -> usize {
        self.size_calls.load(Ordering::SeqCst)
    }

    fn check(&self, creds: &AzureCredentials) -> Result<(), ProviderError> {
        if let Some(status) = self.fail_with {
            return Err(ProviderError::http(status, "upstream failure"));
        }
        if creds.secret != "s3cr3t" {
            return Err(ProviderError::Authentication("invalid client secret".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AzureProvider for FakeAzure {
    async fn list_sizes(
        &self,
        creds: &AzureCredentials,
        _location: &str,
    ) -> Result<Vec<AzureVmSize>, ProviderError> {
        self.size_calls.fetch_add(1, Ordering::SeqCst);
        self.check(creds)?;
        Ok(self.sizes.clone())
    }

    async fn list_resource_groups(
        &self,
        creds: &AzureCredentials,
    ) -> Result<Vec<ResourceGroup>, ProviderError> {
        self.check(creds)?;
        Ok(self.groups.clone())
    }

    async fn get_resource_group(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<Option<ResourceGroup>, ProviderError> {
        self.check(creds)?;
        Ok(self
            .groups
            .iter()
            .find(|g| g.name.as_deref() == Some(name))
            .cloned())
    }

    async fn create_partition(
        &self,
        creds: &AzureCredentials,
        request: &PartitionRequest,
    ) -> Result<ResourceGroup, ProviderError> {
        self.check(creds)?;
        self.created.lock().push(request.clone());

        let mut group = resource_group(&request.name, "Accepted");
        group.location = Some(request.location.clone());
        group.tags = Some(
            request
                .settings()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        );
        Ok(group)
    }

    async fn delete_resource_group(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<String, ProviderError> {
        self.check(creds)?;
        if !self.groups.iter().any(|g| g.name.as_deref() == Some(name)) {
            return Err(ProviderError::NotFound(format!("resource group {}", name)));
        }
        Ok(format!(
            "Deletion of resource group {} in subscription {} accepted",
            name, creds.subscription_id
        ))
    }
}

#[derive(Clone, Default)]
pub struct FakeOpenStack {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl OpenStackProvider for FakeOpenStack {
    async fn list_flavors(
        &self,
        creds: &OpenStackCredentials,
    ) -> Result<Vec<NovaFlavor>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if creds.password != "secret" {
            return Err(ProviderError::Authentication(
                "The request you have made requires authentication.".into(),
            ));
        }
        Ok(vec![NovaFlavor {
            id: "1".to_string(),
            name: "m1.tiny".to_string(),
            vcpus: 1,
            ram: 512,
            disk: 1,
        }])
    }
}
