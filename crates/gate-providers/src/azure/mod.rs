//! Azure Resource Manager client.

mod client;
mod config;
mod models;

pub use client::AzureRestClient;
pub use config::AzureConfig;
pub use models::{AzureVmSize, ResourceGroup, ResourceGroupProperties};
