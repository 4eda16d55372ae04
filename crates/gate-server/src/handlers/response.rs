//! Response bodies shared by the handlers.

use gate_core::{Flavor, Partition};
use serde::Serialize;

use crate::cache::CacheStats;

/// `{"flavors": [...]}`
#[derive(Debug, Serialize)]
pub struct FlavorsResponse<'a> {
    pub flavors: &'a [Flavor],
}

/// `{"partitions": [...]}`
#[derive(Debug, Serialize)]
pub struct PartitionsResponse {
    pub partitions: Vec<Partition>,
}

/// `{"partition": {...}}`, the response of partition creation.
#[derive(Debug, Serialize)]
pub struct PartitionResponse {
    pub partition: Partition,
}

/// `{"result": "..."}`, the acknowledgement of a provider side operation.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: String,
}

/// Response of cache invalidation.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: usize,
    pub message: String,
}

/// `{"caches": [...]}`
#[derive(Debug, Serialize)]
pub struct CachesResponse {
    pub caches: Vec<CacheStats>,
}
