//! Gate Core - Domain records shared by the Cloud Gate crates
//!
//! Provider clients convert vendor payloads into these records, the server
//! caches and serializes them. Nothing in this crate performs I/O.

pub mod error;
pub mod params;
pub mod types;

pub use error::{CoreError, Result};
pub use params::ExtraParams;
pub use types::{Flavor, Partition, PartitionRequest, PartitionStatus};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
