//! Creation parameters of `POST /azure/partitions`.

use axum::{extract::FromRequestParts, http::request::Parts};
use gate_core::PartitionRequest;

use super::credentials::{header_value, require};
use crate::error::AppError;

/// Partition settings from the `partname`, `tenantname`, `imagename`,
/// `flavorname`, `keyname`, `count`, `jobid`, `runtime` and `ports` headers.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionHeaders {
    pub name: String,
    pub tenant: String,
    pub image: String,
    pub flavor: String,
    pub key_name: Option<String>,
    pub count: u32,
    pub job_id: Option<String>,
    pub runtime: Option<String>,
    pub ports: Vec<String>,
}

impl PartitionHeaders {
    /// Completes the settings with the target location.
    pub fn into_request(self, location: impl Into<String>) -> PartitionRequest {
        PartitionRequest {
            name: self.name,
            tenant: self.tenant,
            location: location.into(),
            image: self.image,
            flavor: self.flavor,
            count: self.count,
            key_name: self.key_name,
            job_id: self.job_id,
            runtime: self.runtime,
            ports: self.ports,
        }
    }
}

fn parse_count(value: Option<String>) -> Result<u32, AppError> {
    match value {
        None => Ok(0),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::BadRequest(format!("Invalid header count: '{}' is not a node count", raw))
        }),
    }
}

fn parse_ports(value: Option<String>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|port| !port.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl<S> FromRequestParts<S> for PartitionHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        Ok(Self {
            name: require(header_value(headers, "partname"), "partname")?,
            tenant: require(header_value(headers, "tenantname"), "tenantname")?,
            image: require(header_value(headers, "imagename"), "imagename")?,
            flavor: require(header_value(headers, "flavorname"), "flavorname")?,
            key_name: header_value(headers, "keyname"),
            count: parse_count(header_value(headers, "count"))?,
            job_id: header_value(headers, "jobid"),
            runtime: header_value(headers, "runtime"),
            ports: parse_ports(header_value(headers, "ports")),
        })
    }
}
