//! OpenStack client configuration.

use serde::{Deserialize, Serialize};

/// Keystone and catalog settings for [`OpenStackRestClient`](super::OpenStackRestClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenStackConfig {
    /// Keystone v3 endpoint, e.g. `http://keystone:5000/v3`.
    pub auth_url: String,

    /// Project to scope the token to. Unscoped tokens carry no catalog.
    pub project_name: Option<String>,

    pub user_domain_name: String,
    pub project_domain_name: String,

    /// Catalog interface to use (`public`, `internal` or `admin`).
    pub interface: String,

    /// Region filter for catalog endpoints, any region when unset.
    pub region: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenStackConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:5000/v3".to_string(),
            project_name: None,
            user_domain_name: "Default".to_string(),
            project_domain_name: "Default".to_string(),
            interface: "public".to_string(),
            region: None,
            timeout_seconds: 30,
        }
    }
}

impl OpenStackConfig {
    /// Auth URL without a trailing slash.
    pub fn auth_base(&self) -> &str {
        self.auth_url.trim_end_matches('/')
    }
}
