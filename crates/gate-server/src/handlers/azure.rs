//! Azure flavor endpoint.

use axum::{extract::State, response::Response};
use gate_core::{ExtraParams, Flavor};
use tracing::{debug, error, instrument, warn};

use crate::cache::CacheKey;
use crate::error::AppError;
use crate::extractors::{accept::AcceptFormat, credentials::AzureRequest};
use crate::handlers::response::FlavorsResponse;
use crate::response::to_format;
use crate::state::AppState;

/// GET /azure/flavors
///
/// Serves the VM sizes of the `location` named in the `extra` header, from
/// the `flavors` cache when fresh, otherwise from Azure.
#[instrument(skip_all, fields(location = tracing::field::Empty))]
pub async fn list_flavors(
    State(state): State<AppState>,
    AcceptFormat(format): AcceptFormat,
    request: AzureRequest,
) -> Result<Response, AppError> {
    let extra = ExtraParams::parse(request.extra.as_deref().unwrap_or_default())?;
    let location = match extra.require("location") {
        Ok(location) => location.to_string(),
        Err(e) => {
            warn!("{}", e);
            return Err(e.into());
        }
    };
    tracing::Span::current().record("location", location.as_str());

    let cache = state.flavors_cache()?;
    let key = CacheKey::new([location.as_str()]);

    // An empty cached list is refetched.
    if let Some(flavors) = cache.fetch_and_update(&key).filter(|f| !f.is_empty()) {
        debug!(amount = flavors.len(), "Flavors are taken from cache");
        return to_format(&FlavorsResponse { flavors: &flavors }, format);
    }

    debug!("Flavors not found in the cache, retrieving from Azure");
    let creds = request.credentials()?;
    let sizes = state
        .azure()
        .list_sizes(&creds, &location)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to list Azure VM sizes"))?;

    let flavors: Vec<Flavor> = sizes.into_iter().map(Flavor::from).collect();

    let outcome = cache.update(key, flavors.clone());
    if outcome.changed || outcome.deleted > 0 {
        debug!(
            changed = outcome.changed,
            deleted = outcome.deleted,
            "Flavors cache updated"
        );
    }

    to_format(&FlavorsResponse { flavors: &flavors }, format)
}
