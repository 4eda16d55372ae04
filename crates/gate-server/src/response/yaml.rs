use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::SerializeError;

pub fn to_response<T: Serialize>(data: &T) -> Result<Response, SerializeError> {
    let body = serde_yaml::to_string(data)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/x-yaml")],
        body,
    )
        .into_response())
}
