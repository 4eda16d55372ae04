//! Azure payload shapes and their conversion into domain records.

use std::collections::BTreeMap;

use gate_core::{Flavor, Partition, PartitionRequest, PartitionStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One entry of the `vmSizes` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AzureVmSize {
    pub name: String,
    #[serde(rename = "numberOfCores", default)]
    pub number_of_cores: u32,
    #[serde(rename = "memoryInMB", default)]
    pub memory_in_mb: u64,
    #[serde(rename = "osDiskSizeInMB", default)]
    pub os_disk_size_in_mb: u64,
    #[serde(rename = "resourceDiskSizeInMB", default)]
    pub resource_disk_size_in_mb: u64,
    #[serde(rename = "maxDataDiskCount", default)]
    pub max_data_disk_count: u32,
}

impl From<AzureVmSize> for Flavor {
    fn from(size: AzureVmSize) -> Self {
        Flavor::new(
            size.name.clone(),
            size.name,
            size.number_of_cores,
            size.memory_in_mb,
            size.os_disk_size_in_mb / 1024,
        )
    }
}

/// Resource group as returned by ARM. Every field is optional because
/// incomplete records are reported and skipped rather than failing a listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub properties: Option<ResourceGroupProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceGroupProperties {
    #[serde(rename = "provisioningState", default)]
    pub provisioning_state: Option<String>,
}

impl ResourceGroup {
    /// Converts into a partition, `None` when id or name is missing.
    pub fn to_partition(&self) -> Option<Partition> {
        let id = self.id.as_deref().filter(|s| !s.is_empty())?;
        let name = self.name.as_deref().filter(|s| !s.is_empty())?;

        let state = self
            .properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref());

        let mut partition = Partition::new(id, name, provisioning_status(state));
        partition.location = self.location.clone();
        if let Some(tags) = &self.tags {
            partition.description = tags.get("description").cloned().unwrap_or_default();
            partition.tags = tags.clone();
        }
        Some(partition)
    }
}

fn provisioning_status(state: Option<&str>) -> PartitionStatus {
    match state.map(str::to_ascii_lowercase).as_deref() {
        Some("succeeded") => PartitionStatus::Created,
        Some("creating") | Some("accepted") | Some("updating") => PartitionStatus::Creating,
        Some("deleting") => PartitionStatus::Deleting,
        Some("deleted") => PartitionStatus::Deleted,
        Some("failed") | Some("canceled") => PartitionStatus::Failed,
        _ => PartitionStatus::Unknown,
    }
}

/// Generic ARM list envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ArmList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

/// Body of the resource group PUT that creates a partition.
#[derive(Debug, Serialize)]
pub(crate) struct ResourceGroupCreate<'a> {
    pub location: &'a str,
    pub tags: BTreeMap<&'static str, String>,
}

impl<'a> ResourceGroupCreate<'a> {
    pub fn new(request: &'a PartitionRequest) -> Self {
        Self {
            location: &request.location,
            tags: request.settings().into_iter().collect(),
        }
    }
}

/// Body of the deployment PUT that provisions a partition.
#[derive(Debug, Serialize)]
pub(crate) struct Deployment {
    pub properties: DeploymentProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeploymentProperties {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_link: Option<TemplateLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    pub parameters: BTreeMap<&'static str, ParameterValue>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TemplateLink {
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ParameterValue {
    pub value: String,
}

impl Deployment {
    /// Incremental deployment of `template_uri`, or of an empty inline
    /// template declaring the creation settings as string parameters.
    pub fn new(request: &PartitionRequest, template_uri: Option<&str>) -> Self {
        let settings = request.settings();

        let (template_link, template) = match template_uri {
            Some(uri) => (Some(TemplateLink { uri: uri.to_string() }), None),
            None => {
                let declared: serde_json::Map<String, Value> = settings
                    .iter()
                    .map(|(name, _)| (name.to_string(), json!({ "type": "string" })))
                    .collect();
                let template = json!({
                    "$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#",
                    "contentVersion": "1.0.0.0",
                    "parameters": declared,
                    "resources": [],
                });
                (None, Some(template))
            }
        };

        let parameters = settings
            .into_iter()
            .map(|(name, value)| (name, ParameterValue { value }))
            .collect();

        Self {
            properties: DeploymentProperties {
                mode: "Incremental",
                template_link,
                template,
                parameters,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vm_size_to_flavor() {
        let size: AzureVmSize = serde_json::from_str(
            r#"{
                "name": "Standard_D2s_v3",
                "numberOfCores": 2,
                "osDiskSizeInMB": 1047552,
                "resourceDiskSizeInMB": 16384,
                "memoryInMB": 8192,
                "maxDataDiskCount": 4
            }"#,
        )
        .unwrap();

        let flavor = Flavor::from(size);
        assert_eq!(flavor.id, "Standard_D2s_v3");
        assert_eq!(flavor.name, "Standard_D2s_v3");
        assert_eq!(flavor.cpus, 2);
        assert_eq!(flavor.mem, 8192);
        assert_eq!(flavor.storage, 1023);
        assert_eq!(flavor.price, 0.0);
    }

    #[test]
    fn test_resource_group_to_partition() {
        let group: ResourceGroup = serde_json::from_str(
            r#"{
                "id": "/subscriptions/s1/resourceGroups/swm-42",
                "name": "swm-42",
                "location": "eastus",
                "tags": {"description": "job 42", "jobid": "42"},
                "properties": {"provisioningState": "Succeeded"}
            }"#,
        )
        .unwrap();

        let part = group.to_partition().unwrap();
        assert_eq!(part.name, "swm-42");
        assert_eq!(part.status, PartitionStatus::Created);
        assert_eq!(part.location.as_deref(), Some("eastus"));
        assert_eq!(part.description, "job 42");
        assert_eq!(part.tags.get("jobid").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_incomplete_resource_group_is_rejected() {
        let group = ResourceGroup {
            name: Some("orphan".to_string()),
            ..Default::default()
        };
        assert!(group.to_partition().is_none());

        let group = ResourceGroup {
            id: Some("/subscriptions/s1/resourceGroups/x".to_string()),
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(group.to_partition().is_none());
    }

    #[test]
    fn test_provisioning_status_mapping() {
        assert_eq!(provisioning_status(Some("Deleting")), PartitionStatus::Deleting);
        assert_eq!(provisioning_status(Some("Accepted")), PartitionStatus::Creating);
        assert_eq!(provisioning_status(Some("Canceled")), PartitionStatus::Failed);
        assert_eq!(provisioning_status(Some("Moving")), PartitionStatus::Unknown);
        assert_eq!(provisioning_status(None), PartitionStatus::Unknown);
    }

    fn partition_request() -> PartitionRequest {
        PartitionRequest {
            name: "job-42".to_string(),
            tenant: "acme".to_string(),
            location: "eastus".to_string(),
            image: "ubuntu-22.04".to_string(),
            flavor: "Standard_D2s_v3".to_string(),
            count: 1,
            key_name: Some("ops".to_string()),
            job_id: None,
            runtime: None,
            ports: vec!["22".to_string()],
        }
    }

    #[test]
    fn test_inline_deployment_declares_every_parameter() {
        let body = serde_json::to_value(Deployment::new(&partition_request(), None)).unwrap();
        let properties = &body["properties"];

        assert_eq!(properties["mode"], "Incremental");
        assert!(properties.get("templateLink").is_none());
        assert_eq!(properties["parameters"]["keyName"]["value"], "ops");
        assert_eq!(properties["parameters"]["ports"]["value"], "22");

        let declared = properties["template"]["parameters"].as_object().unwrap();
        let passed = properties["parameters"].as_object().unwrap();
        assert_eq!(declared.len(), passed.len());
        assert!(passed.keys().all(|name| declared.contains_key(name)));
    }

    #[test]
    fn test_linked_template_deployment() {
        let body = serde_json::to_value(Deployment::new(
            &partition_request(),
            Some("https://templates.example.com/partition.json"),
        ))
        .unwrap();

        assert_eq!(
            body["properties"]["templateLink"]["uri"],
            "https://templates.example.com/partition.json"
        );
        assert!(body["properties"].get("template").is_none());
    }

    #[test]
    fn test_resource_group_create_tags() {
        let request = partition_request();
        let body = serde_json::to_value(ResourceGroupCreate::new(&request)).unwrap();

        assert_eq!(body["location"], "eastus");
        assert_eq!(body["tags"]["tenant"], "acme");
        assert_eq!(body["tags"]["flavor"], "Standard_D2s_v3");
    }
}
