//! HTTP handlers.

pub mod azure;
pub mod cache;
pub mod health;
pub mod metrics;
pub mod openstack;
pub mod partitions;
pub mod response;
