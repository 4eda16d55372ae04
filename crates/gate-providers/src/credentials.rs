//! Per-request credentials.
//!
//! Credentials arrive with each HTTP request and are handed to the client
//! call that needs them. They are never stored by a client.

use std::fmt;

/// Service principal credentials for Azure Resource Manager.
#[derive(Clone, PartialEq, Eq)]
pub struct AzureCredentials {
    pub subscription_id: String,
    pub tenant_id: String,
    pub app_id: String,
    pub secret: String,
}

impl AzureCredentials {
    pub fn new(
        subscription_id: impl Into<String>,
        tenant_id: impl Into<String>,
        app_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            tenant_id: tenant_id.into(),
            app_id: app_id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for AzureCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureCredentials")
            .field("subscription_id", &self.subscription_id)
            .field("tenant_id", &self.tenant_id)
            .field("app_id", &self.app_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Keystone username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenStackCredentials {
    pub username: String,
    pub password: String,
}

impl OpenStackCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for OpenStackCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenStackCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
