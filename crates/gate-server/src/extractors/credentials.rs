//! Credential passthrough extractors.
//!
//! Credentials are taken from request headers (and, for the Azure client
//! secret, from a JSON body) on every request. Header names follow the
//! existing API: `subscriptionid`, `tenantid`, `appid`, `extra`,
//! `username`, `password`.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
};
use gate_providers::{AzureCredentials, OpenStackCredentials};
use serde::Deserialize;

use crate::error::AppError;

pub(crate) fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

pub(crate) fn require(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing required header: {}", name)))
}

/// Optional JSON body of Azure requests.
#[derive(Debug, Default, Deserialize)]
pub struct AzureBody {
    #[serde(default)]
    pub secret: Option<String>,
}

/// Azure request context. Validation is deferred to
/// [`AzureRequest::credentials`] because a cache hit needs no credentials.
pub struct AzureRequest {
    pub subscription_id: Option<String>,
    pub tenant_id: Option<String>,
    pub app_id: Option<String>,
    pub extra: Option<String>,
    pub secret: Option<String>,
}

impl AzureRequest {
    /// Builds credentials for the subscription named in the headers.
    pub fn credentials(&self) -> Result<AzureCredentials, AppError> {
        let subscription = require(self.subscription_id.clone(), "subscriptionid")?;
        self.credentials_for(&subscription)
    }

    /// Builds credentials for an explicit subscription, e.g. one taken from the path.
    pub fn credentials_for(&self, subscription_id: &str) -> Result<AzureCredentials, AppError> {
        let tenant = require(self.tenant_id.clone(), "tenantid")?;
        let app = require(self.app_id.clone(), "appid")?;
        let secret = self
            .secret
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::BadRequest("Missing client secret in request body".to_string())
            })?;

        Ok(AzureCredentials::new(subscription_id, tenant, app, secret))
    }
}

impl<S> FromRequest<S> for AzureRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers();
        let subscription_id = header_value(headers, "subscriptionid");
        let tenant_id = header_value(headers, "tenantid");
        let app_id = header_value(headers, "appid");
        let extra = header_value(headers, "extra");

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let body: AzureBody = if bytes.iter().all(u8::is_ascii_whitespace) {
            AzureBody::default()
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?
        };

        Ok(Self {
            subscription_id,
            tenant_id,
            app_id,
            extra,
            secret: body.secret,
        })
    }
}

/// Keystone credentials from the `username` and `password` headers.
#[derive(Debug)]
pub struct OpenStackAuth(pub OpenStackCredentials);

impl<S> FromRequestParts<S> for OpenStackAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = require(header_value(&parts.headers, "username"), "username")?;
        let password = require(header_value(&parts.headers, "password"), "password")?;

        Ok(OpenStackAuth(OpenStackCredentials::new(username, password)))
    }
}
