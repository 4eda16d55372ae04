//! Request extractors.

pub mod accept;
pub mod credentials;
pub mod partition;
