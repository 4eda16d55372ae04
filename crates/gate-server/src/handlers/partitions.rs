//! Azure partition endpoints. A partition maps to a resource group.

use axum::{
    extract::{Path, State},
    response::Response,
};
use gate_core::ExtraParams;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::error::AppError;
use crate::extractors::{
    accept::AcceptFormat, credentials::AzureRequest, partition::PartitionHeaders,
};
use crate::handlers::response::{PartitionResponse, PartitionsResponse, ResultResponse};
use crate::response::to_format;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PartitionPath {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourceGroupPath {
    pub subscription_id: String,
    pub name: String,
}

/// POST /azure/partitions
///
/// Creates a resource group in the `location` named in the `extra` header
/// and deploys the partition into it.
#[instrument(skip_all, fields(partition = %headers.name, tenant = %headers.tenant))]
pub async fn create_partition(
    State(state): State<AppState>,
    AcceptFormat(format): AcceptFormat,
    headers: PartitionHeaders,
    request: AzureRequest,
) -> Result<Response, AppError> {
    let extra = ExtraParams::parse(request.extra.as_deref().unwrap_or_default())?;
    let location = extra.require("location")?.to_string();
    let creds = request.credentials()?;
    let spec = headers.into_request(location);

    info!(
        job_id = spec.job_id.as_deref().unwrap_or("-"),
        location = %spec.location,
        "Creating Azure partition"
    );
    debug!(
        image = %spec.image,
        flavor = %spec.flavor,
        key_name = spec.key_name.as_deref().unwrap_or("-"),
        extra_nodes = spec.count,
        runtime = spec.runtime.as_deref().unwrap_or("-"),
        ports = %spec.ports.join(","),
        "Partition creation options"
    );

    let group = state
        .azure()
        .create_partition(&creds, &spec)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to create Azure partition"))?;

    let partition = group.to_partition().ok_or_else(|| {
        AppError::Upstream("Created resource group information is incomplete".to_string())
    })?;

    to_format(&PartitionResponse { partition }, format)
}

/// GET /azure/partitions
#[instrument(skip_all)]
pub async fn list_partitions(
    State(state): State<AppState>,
    AcceptFormat(format): AcceptFormat,
    request: AzureRequest,
) -> Result<Response, AppError> {
    let creds = request.credentials()?;
    let groups = state.azure().list_resource_groups(&creds).await?;

    let mut partitions = Vec::with_capacity(groups.len());
    for group in &groups {
        match group.to_partition() {
            Some(partition) => partitions.push(partition),
            None => warn!(?group, "Returned resource group information is incomplete"),
        }
    }

    to_format(&PartitionsResponse { partitions }, format)
}

/// GET /azure/partitions/{id}
#[instrument(skip_all, fields(partition = %path.id))]
pub async fn get_partition(
    State(state): State<AppState>,
    Path(path): Path<PartitionPath>,
    AcceptFormat(format): AcceptFormat,
    request: AzureRequest,
) -> Result<Response, AppError> {
    let creds = request.credentials()?;

    let partition = state
        .azure()
        .get_resource_group(&creds, &path.id)
        .await?
        .and_then(|group| group.to_partition())
        .ok_or_else(|| AppError::NotFound("Partition not found".to_string()))?;

    to_format(&partition, format)
}

/// DELETE /azure/partitions//subscriptions/{subscription_id}/resourceGroups/{name}
///
/// Also routed with a single slash after `partitions`.
#[instrument(skip_all, fields(subscription = %path.subscription_id, partition = %path.name))]
pub async fn delete_partition(
    State(state): State<AppState>,
    Path(path): Path<ResourceGroupPath>,
    AcceptFormat(format): AcceptFormat,
    request: AzureRequest,
) -> Result<Response, AppError> {
    let creds = request.credentials_for(&path.subscription_id)?;

    let result = state
        .azure()
        .delete_resource_group(&creds, &path.name)
        .await?;

    info!(result = %result, "Partition deletion requested");

    to_format(&ResultResponse { result }, format)
}
