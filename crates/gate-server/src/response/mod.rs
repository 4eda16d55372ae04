//! Response serialization.
//!
//! Handlers build a serde value and let the negotiated [`OutputFormat`]
//! decide between JSON (default) and YAML.

pub mod json;
pub mod yaml;

use axum::response::Response;
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::accept::OutputFormat;

/// Serialization error.
#[derive(Debug)]
pub enum SerializeError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        SerializeError::Json(err)
    }
}

impl From<serde_yaml::Error> for SerializeError {
    fn from(err: serde_yaml::Error) -> Self {
        SerializeError::Yaml(err)
    }
}

impl From<SerializeError> for AppError {
    fn from(err: SerializeError) -> Self {
        let message = match err {
            SerializeError::Json(e) => format!("JSON serialization error: {}", e),
            SerializeError::Yaml(e) => format!("YAML serialization error: {}", e),
        };
        AppError::Internal(message)
    }
}

/// Serializes `data` in the requested format.
pub fn to_format<T: Serialize>(data: &T, format: OutputFormat) -> Result<Response, AppError> {
    let response = match format {
        OutputFormat::Json => json::to_response(data)?,
        OutputFormat::Yaml => yaml::to_response(data)?,
    };
    Ok(response)
}
