//! Domain records returned by the HTTP API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A compute instance shape (VM size).
///
/// # Example
///
/// ```
/// use gate_core::Flavor;
///
/// let flavor = Flavor::new("Standard_D2", "Standard_D2", 2, 8192, 30);
/// assert_eq!(flavor.cpus, 2);
/// assert_eq!(flavor.price, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    /// Provider identifier of the shape
    pub id: String,
    /// Human readable name
    pub name: String,
    /// Number of virtual CPUs
    pub cpus: u32,
    /// Memory in MiB
    pub mem: u64,
    /// Root storage in GiB
    pub storage: u64,
    /// Hourly price, zero when the provider does not report one
    #[serde(default)]
    pub price: f64,
}

impl Flavor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cpus: u32,
        mem: u64,
        storage: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cpus,
            mem,
            storage,
            price: 0.0,
        }
    }

    /// Sets the hourly price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }
}

/// Lifecycle state of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStatus {
    Creating,
    Created,
    Deleting,
    Deleted,
    Failed,
    #[default]
    Unknown,
}

impl PartitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Created => "created",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PartitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named compute stack deployed for a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub id: String,
    pub name: String,
    pub status: PartitionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Partition {
    /// Creates a partition with only identity and status set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: PartitionStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            location: None,
            created: None,
            updated: None,
            description: String::new(),
            tags: BTreeMap::new(),
        }
    }
}

/// Parameters of a partition to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionRequest {
    pub name: String,
    pub tenant: String,
    pub location: String,
    pub image: String,
    pub flavor: String,
    /// Number of extra nodes
    #[serde(default)]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
}

impl PartitionRequest {
    /// Creation settings as `(name, value)` pairs. Unset optional
    /// settings are left out and `ports` is joined with commas.
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        let mut settings = vec![
            ("tenant", self.tenant.clone()),
            ("image", self.image.clone()),
            ("flavor", self.flavor.clone()),
            ("count", self.count.to_string()),
        ];
        let optional = [
            ("keyName", &self.key_name),
            ("jobId", &self.job_id),
            ("runtime", &self.runtime),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                settings.push((name, value.clone()));
            }
        }
        if !self.ports.is_empty() {
            settings.push(("ports", self.ports.join(",")));
        }
        settings
    }
}
