//! Cache administration handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::handlers::response::{CachesResponse, InvalidateResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CacheNamePath {
    pub name: String,
}

/// GET /cache
/// Lists the caches created so far.
pub async fn list_caches(State(state): State<AppState>) -> Json<CachesResponse> {
    Json(CachesResponse {
        caches: state.caches().stats(),
    })
}

/// DELETE /cache
/// Empties every cache.
#[instrument(skip_all)]
pub async fn invalidate_all(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let count = state.caches().clear_all();

    info!(count = count, "All cache entries invalidated");

    Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated all {} cache entries", count),
    })
}

/// POST /cache/purge
/// Sweeps expired entries out of every cache.
#[instrument(skip_all)]
pub async fn purge_expired(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let count = state.caches().purge_expired();

    info!(count = count, "Expired cache entries purged");

    Json(InvalidateResponse {
        invalidated: count,
        message: format!("Purged {} expired cache entries", count),
    })
}

/// DELETE /cache/{name}
/// Empties one named cache.
#[instrument(skip_all, fields(cache = %path.name))]
pub async fn invalidate_cache(
    State(state): State<AppState>,
    Path(path): Path<CacheNamePath>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let count = state.caches().clear(&path.name)?;

    info!(count = count, "Cache entries invalidated");

    Ok(Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated {} entries of cache '{}'", count, path.name),
    }))
}
