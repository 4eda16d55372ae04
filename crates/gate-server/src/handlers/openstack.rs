//! OpenStack flavor endpoint.

use axum::{extract::State, response::Response};
use gate_core::Flavor;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::extractors::{accept::AcceptFormat, credentials::OpenStackAuth};
use crate::handlers::response::FlavorsResponse;
use crate::response::to_format;
use crate::state::AppState;

/// GET /openstack/flavors
#[instrument(skip_all, fields(username = %creds.username))]
pub async fn list_flavors(
    State(state): State<AppState>,
    AcceptFormat(format): AcceptFormat,
    OpenStackAuth(creds): OpenStackAuth,
) -> Result<Response, AppError> {
    let flavors: Vec<Flavor> = state
        .openstack()
        .list_flavors(&creds)
        .await?
        .into_iter()
        .map(Flavor::from)
        .collect();

    debug!(amount = flavors.len(), "OpenStack flavors retrieved");

    to_format(&FlavorsResponse { flavors: &flavors }, format)
}
