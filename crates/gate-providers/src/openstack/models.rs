//! Keystone and Nova payload shapes.

use gate_core::Flavor;
use serde::Deserialize;

/// One entry of `GET /flavors/detail`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NovaFlavor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vcpus: u32,
    /// Memory in MiB
    #[serde(default)]
    pub ram: u64,
    /// Root disk in GiB
    #[serde(default)]
    pub disk: u64,
}

impl From<NovaFlavor> for Flavor {
    fn from(flavor: NovaFlavor) -> Self {
        Flavor::new(flavor.id, flavor.name, flavor.vcpus, flavor.ram, flavor.disk)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlavorList {
    #[serde(default)]
    pub flavors: Vec<NovaFlavor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenEnvelope {
    pub token: TokenBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenBody {
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogEndpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    pub url: String,
}

impl TokenBody {
    /// Finds the URL of `service_type` for the given interface and optional region.
    pub fn endpoint(&self, service_type: &str, interface: &str, region: Option<&str>) -> Option<&str> {
        self.catalog
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .find(|ep| {
                ep.interface == interface
                    && region.is_none_or(|r| ep.region.as_deref() == Some(r))
            })
            .map(|ep| ep.url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenBody {
        let envelope: TokenEnvelope = serde_json::from_str(
            r#"{"token": {"catalog": [
                {"type": "identity", "endpoints": [
                    {"interface": "public", "region": "RegionOne", "url": "http://keystone/v3"}
                ]},
                {"type": "compute", "endpoints": [
                    {"interface": "internal", "region": "RegionOne", "url": "http://nova-int/v2.1"},
                    {"interface": "public", "region": "RegionOne", "url": "http://nova/v2.1/"},
                    {"interface": "public", "region": "RegionTwo", "url": "http://nova-two/v2.1"}
                ]}
            ]}}"#,
        )
        .unwrap();
        envelope.token
    }

    #[test]
    fn test_endpoint_lookup() {
        let token = token();
        assert_eq!(token.endpoint("compute", "public", None), Some("http://nova/v2.1"));
        assert_eq!(
            token.endpoint("compute", "internal", None),
            Some("http://nova-int/v2.1")
        );
        assert_eq!(
            token.endpoint("compute", "public", Some("RegionTwo")),
            Some("http://nova-two/v2.1")
        );
        assert_eq!(token.endpoint("volume", "public", None), None);
    }

    #[test]
    fn test_nova_flavor_to_flavor() {
        let nova = NovaFlavor {
            id: "3".to_string(),
            name: "m1.medium".to_string(),
            vcpus: 2,
            ram: 4096,
            disk: 40,
        };
        let flavor = Flavor::from(nova);
        assert_eq!(flavor, Flavor::new("3", "m1.medium", 2, 4096, 40));
    }
}
