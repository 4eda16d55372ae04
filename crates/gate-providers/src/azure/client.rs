//! REST implementation of [`AzureProvider`].

use std::time::Duration;

use async_trait::async_trait;
use gate_core::PartitionRequest;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::config::AzureConfig;
use super::models::{
    ArmList, AzureVmSize, Deployment, ResourceGroup, ResourceGroupCreate, TokenResponse,
};
use crate::credentials::AzureCredentials;
use crate::error::ProviderError;
use crate::traits::AzureProvider;

/// Upper bound on `nextLink` pages followed for a single listing.
const MAX_PAGES: usize = 100;

/// Azure Resource Manager client.
///
/// Tokens are requested per call with the caller's service principal, so the
/// client holds no per-tenant state.
pub struct AzureRestClient {
    http: Client,
    config: AzureConfig,
}

impl AzureRestClient {
    /// Creates a new client from the given settings.
    pub fn new(config: AzureConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AzureConfig {
        &self.config
    }

    async fn access_token(&self, creds: &AzureCredentials) -> Result<String, ProviderError> {
        let mut url = Url::parse(self.config.login_base())
            .map_err(|e| ProviderError::InvalidConfig(format!("login_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidConfig("login_url cannot be a base".into()))?
            .pop_if_empty()
            .extend([creds.tenant_id.as_str(), "oauth2", "v2.0", "token"]);

        let response = self
            .http
            .post(url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", creds.app_id.as_str()),
                ("client_secret", creds.secret.as_str()),
                ("scope", self.config.scope.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Authentication(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// `{management}/subscriptions/{id}/{segments..}?api-version={version}`.
    ///
    /// Every segment is percent-encoded, so caller supplied names cannot
    /// add path segments, a query or a fragment.
    fn arm_url(
        &self,
        creds: &AzureCredentials,
        segments: &[&str],
        api_version: &str,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(self.config.management_base())
            .map_err(|e| ProviderError::InvalidConfig(format!("management_url: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidConfig("management_url cannot be a base".into()))?
            .pop_if_empty()
            .push("subscriptions")
            .push(&creds.subscription_id)
            .extend(segments);
        url.query_pairs_mut().append_pair("api-version", api_version);

        Ok(url)
    }

    fn resource_group_url(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<Url, ProviderError> {
        self.arm_url(
            creds,
            &["resourcegroups", name],
            &self.config.resources_api_version,
        )
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        token: &str,
        url: Url,
    ) -> Result<Vec<T>, ProviderError> {
        let mut items = Vec::new();
        let mut next = Some(url);
        let mut pages = 0;

        while let Some(url) = next.take() {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(ProviderError::decode("too many result pages"));
            }

            let response = self.http.get(url).bearer_auth(token).send().await?;
            let page: ArmList<T> = check_status(response).await?.json().await?;
            items.extend(page.value);
            next = match page.next_link.filter(|link| !link.is_empty()) {
                Some(link) => Some(
                    Url::parse(&link)
                        .map_err(|e| ProviderError::decode(format!("invalid nextLink: {}", e)))?,
                ),
                None => None,
            };
        }

        Ok(items)
    }
}

/// Turns a non-success response into `ProviderError::Http`.
async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::http(status.as_u16(), body))
}

#[async_trait]
impl AzureProvider for AzureRestClient {
    async fn list_sizes(
        &self,
        creds: &AzureCredentials,
        location: &str,
    ) -> Result<Vec<AzureVmSize>, ProviderError> {
        let token = self.access_token(creds).await?;
        let url = self.arm_url(
            creds,
            &["providers", "Microsoft.Compute", "locations", location, "vmSizes"],
            &self.config.compute_api_version,
        )?;

        debug!(location = %location, "Listing Azure VM sizes");
        let sizes: Vec<AzureVmSize> = self.get_list(&token, url).await?;
        debug!(location = %location, count = sizes.len(), "Azure VM sizes received");

        Ok(sizes)
    }

    async fn list_resource_groups(
        &self,
        creds: &AzureCredentials,
    ) -> Result<Vec<ResourceGroup>, ProviderError> {
        let token = self.access_token(creds).await?;
        let url = self.arm_url(
            creds,
            &["resourcegroups"],
            &self.config.resources_api_version,
        )?;

        self.get_list(&token, url).await
    }

    async fn get_resource_group(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<Option<ResourceGroup>, ProviderError> {
        let token = self.access_token(creds).await?;
        let url = self.resource_group_url(creds, name)?;

        let response = self.http.get(url).bearer_auth(&token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let group = check_status(response).await?.json().await?;
        Ok(Some(group))
    }

    async fn create_partition(
        &self,
        creds: &AzureCredentials,
        request: &PartitionRequest,
    ) -> Result<ResourceGroup, ProviderError> {
        let token = self.access_token(creds).await?;

        let url = self.resource_group_url(creds, &request.name)?;
        let response = self
            .http
            .put(url)
            .bearer_auth(&token)
            .json(&ResourceGroupCreate::new(request))
            .send()
            .await?;
        let group: ResourceGroup = check_status(response).await?.json().await?;

        let url = self.arm_url(
            creds,
            &[
                "resourcegroups",
                request.name.as_str(),
                "providers",
                "Microsoft.Resources",
                "deployments",
                request.name.as_str(),
            ],
            &self.config.resources_api_version,
        )?;
        let deployment = Deployment::new(request, self.config.template_uri.as_deref());
        let response = self
            .http
            .put(url)
            .bearer_auth(&token)
            .json(&deployment)
            .send()
            .await?;
        let status = check_status(response).await?.status();

        info!(
            resource_group = %request.name,
            tenant = %request.tenant,
            status = status.as_u16(),
            "Partition deployment started"
        );

        Ok(group)
    }

    async fn delete_resource_group(
        &self,
        creds: &AzureCredentials,
        name: &str,
    ) -> Result<String, ProviderError> {
        let token = self.access_token(creds).await?;
        let url = self.resource_group_url(creds, name)?;

        let response = self.http.delete(url).bearer_auth(&token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(format!("resource group {}", name)));
        }

        let status = check_status(response).await?.status();
        info!(resource_group = %name, status = status.as_u16(), "Resource group deletion requested");

        Ok(match status {
            StatusCode::ACCEPTED => format!("Deletion of resource group {} accepted", name),
            _ => format!("Resource group {} deleted", name),
        })
    }
}
