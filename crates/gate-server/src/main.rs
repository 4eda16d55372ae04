//! Cloud Gate server binary.

use std::sync::Arc;

use anyhow::Context;
use gate_providers::{AzureRestClient, OpenStackRestClient};
use gate_server::cache::CacheRegistry;
use gate_server::metrics::init_metrics;
use gate_server::{AppState, Settings, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.socket_addr()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        azure = %settings.azure.management_url,
        openstack = %settings.openstack.auth_url,
        "Starting Cloud Gate"
    );

    let prometheus = init_metrics().context("failed to install metrics recorder")?;

    let azure = AzureRestClient::new(settings.azure.clone())
        .context("failed to build Azure client")?;
    let openstack = OpenStackRestClient::new(settings.openstack.clone())
        .context("failed to build OpenStack client")?;

    let caches = Arc::new(CacheRegistry::new(settings.cache.clone()));
    let state = AppState::new(caches, Arc::new(azure), Arc::new(openstack));

    run_server(addr, state, prometheus).await?;

    tracing::info!("Server stopped");
    Ok(())
}
