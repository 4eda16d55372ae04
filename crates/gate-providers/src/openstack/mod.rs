//! OpenStack Compute client.

mod client;
mod config;
mod models;

pub use client::OpenStackRestClient;
pub use config::OpenStackConfig;
pub use models::NovaFlavor;
