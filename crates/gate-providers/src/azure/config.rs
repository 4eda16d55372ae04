//! Azure client configuration.

use serde::{Deserialize, Serialize};

/// Endpoints and API versions used by [`AzureRestClient`](super::AzureRestClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Base URL of Azure Resource Manager.
    pub management_url: String,

    /// Base URL of the Microsoft identity platform.
    pub login_url: String,

    /// OAuth2 scope requested for management tokens.
    pub scope: String,

    /// `api-version` for Microsoft.Compute calls.
    pub compute_api_version: String,

    /// `api-version` for resource group calls.
    pub resources_api_version: String,

    /// ARM template deployed into new partitions. Without one, the
    /// deployment only records the creation parameters.
    pub template_uri: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            management_url: "https://management.azure.com".to_string(),
            login_url: "https://login.microsoftonline.com".to_string(),
            scope: "https://management.azure.com/.default".to_string(),
            compute_api_version: "2024-07-01".to_string(),
            resources_api_version: "2021-04-01".to_string(),
            template_uri: None,
            timeout_seconds: 30,
        }
    }
}

impl AzureConfig {
    /// Management URL without a trailing slash.
    pub fn management_base(&self) -> &str {
        self.management_url.trim_end_matches('/')
    }

    /// Login URL without a trailing slash.
    pub fn login_base(&self) -> &str {
        self.login_url.trim_end_matches('/')
    }
}
