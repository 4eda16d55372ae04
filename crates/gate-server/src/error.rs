use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gate_core::CoreError;
use gate_providers::ProviderError;
use serde::Serialize;

use crate::cache::CacheError;

#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request input
    BadRequest(String),

    /// The provider rejected the supplied credentials
    Unauthorized(String),

    /// The requested resource does not exist
    NotFound(String),

    /// The provider call failed
    Upstream(String),

    /// Failure inside the gateway
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Authentication(_) => AppError::Unauthorized(err.to_string()),
            ProviderError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProviderError::InvalidConfig(_) => AppError::Internal(err.to_string()),
            _ => AppError::Upstream(err.to_string()),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::UnknownCache(_) => AppError::NotFound(err.to_string()),
            CacheError::TypeMismatch { .. } => AppError::Internal(err.to_string()),
        }
    }
}
