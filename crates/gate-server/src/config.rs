//! Layered service settings.
//!
//! Values come from, lowest priority first:
//! 1. built-in defaults
//! 2. an optional settings file (`cloud-gate.toml`, or the path in `GATE_CONFIG`)
//! 3. `GATE_*` environment variables, nested with `__`
//!    (e.g. `GATE_SERVER__PORT=9000`, `GATE_CACHE__TTL_SECONDS__FLAVORS=120`)

use std::net::{IpAddr, SocketAddr};

use config::{Config, ConfigError, Environment, File};
use gate_providers::{AzureConfig, OpenStackConfig};
use serde::{Deserialize, Serialize};

use crate::cache::CacheSettings;

/// Settings file used when `GATE_CONFIG` is unset. The extension is optional.
pub const DEFAULT_CONFIG_FILE: &str = "cloud-gate";

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_ENV: &str = "GATE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub azure: AzureConfig,
    pub openstack: OpenStackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8444,
        }
    }
}

impl Settings {
    /// Loads settings from the default file location and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Loads settings from `path` (if it exists) and the environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("GATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            ConfigError::Message(format!("invalid server.host '{}': {}", self.server.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::Builder;

    fn settings_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.server.port, 8444);
        assert_eq!(settings.cache.ttl_for("flavors"), Duration::from_secs(60));
        assert_eq!(
            settings.socket_addr().unwrap(),
            "0.0.0.0:8444".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("/nonexistent/cloud-gate-settings").unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.openstack.interface, "public");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = settings_file(
            r#"
[server]
port = 9100

[cache]
default_ttl_seconds = 15

[cache.ttl_seconds]
flavors = 300

[openstack]
auth_url = "http://keystone.internal:5000/v3"
project_name = "admin"
"#,
        );

        let settings = Settings::load_from(file.path().to_str().unwrap()).unwrap();

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.cache.ttl_for("flavors"), Duration::from_secs(300));
        assert_eq!(settings.cache.ttl_for("other"), Duration::from_secs(15));
        assert_eq!(settings.openstack.project_name.as_deref(), Some("admin"));
        assert_eq!(settings.azure.compute_api_version, "2024-07-01");
    }

    #[test]
    fn test_invalid_host() {
        let mut settings = Settings::default();
        settings.server.host = "not-an-ip".to_string();

        assert!(settings.socket_addr().is_err());
    }
}
