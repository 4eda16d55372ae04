//! REST implementation of [`OpenStackProvider`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::config::OpenStackConfig;
use super::models::{FlavorList, NovaFlavor, TokenEnvelope};
use crate::credentials::OpenStackCredentials;
use crate::error::ProviderError;
use crate::traits::OpenStackProvider;

const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Keystone-authenticated Nova client.
pub struct OpenStackRestClient {
    http: Client,
    config: OpenStackConfig,
}

/// A token together with the compute endpoint found in its catalog.
struct Session {
    token: String,
    compute_url: String,
}

impl OpenStackRestClient {
    /// Creates a new client from the given settings.
    pub fn new(config: OpenStackConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OpenStackConfig {
        &self.config
    }

    fn auth_body(&self, creds: &OpenStackCredentials) -> serde_json::Value {
        let mut auth = json!({
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": creds.username,
                        "domain": { "name": self.config.user_domain_name },
                        "password": creds.password,
                    }
                }
            }
        });

        if let Some(project) = &self.config.project_name {
            auth["scope"] = json!({
                "project": {
                    "name": project,
                    "domain": { "name": self.config.project_domain_name },
                }
            });
        }

        json!({ "auth": auth })
    }

    async fn authenticate(&self, creds: &OpenStackCredentials) -> Result<Session, ProviderError> {
        let url = format!("{}/auth/tokens", self.config.auth_base());

        let response = self
            .http
            .post(url)
            .json(&self.auth_body(creds))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Authentication(format!("{}: {}", status, body)));
        }

        let token = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| ProviderError::decode("missing X-Subject-Token header"))?;

        let envelope: TokenEnvelope = response.json().await?;
        let compute_url = envelope
            .token
            .endpoint(
                "compute",
                &self.config.interface,
                self.config.region.as_deref(),
            )
            .map(String::from)
            .ok_or_else(|| {
                ProviderError::NotFound(format!(
                    "compute endpoint with interface '{}' in service catalog",
                    self.config.interface
                ))
            })?;

        debug!(compute_url = %compute_url, "Keystone session established");

        Ok(Session { token, compute_url })
    }
}

#[async_trait]
impl OpenStackProvider for OpenStackRestClient {
    async fn list_flavors(
        &self,
        creds: &OpenStackCredentials,
    ) -> Result<Vec<NovaFlavor>, ProviderError> {
        let session = self.authenticate(creds).await?;
        let url = format!("{}/flavors/detail", session.compute_url);

        let response = self
            .http
            .get(url)
            .header(AUTH_TOKEN_HEADER, &session.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::http(status.as_u16(), body));
        }

        let list: FlavorList = response.json().await?;
        Ok(list.flavors)
    }
}
