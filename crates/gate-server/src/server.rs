use std::net::SocketAddr;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;

use crate::handlers::{
    azure, cache,
    health::health_check,
    metrics::metrics_handler,
    openstack, partitions,
};
use crate::middleware::{RequestIdLayer, request_logging};
use crate::state::AppState;

/// Builds the full router: provider endpoints, cache admin and `/metrics`.
pub fn create_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(middleware::from_fn(request_logging));

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    let app_router = Router::new()
        .route("/health", get(health_check))
        .route("/azure/flavors", get(azure::list_flavors))
        .route(
            "/azure/partitions",
            get(partitions::list_partitions).post(partitions::create_partition),
        )
        .route("/azure/partitions/{id}", get(partitions::get_partition))
        // ARM ids start with a slash, so callers send `partitions//subscriptions/..`.
        .route(
            "/azure/partitions//subscriptions/{subscription_id}/resourceGroups/{name}",
            delete(partitions::delete_partition),
        )
        .route(
            "/azure/partitions/subscriptions/{subscription_id}/resourceGroups/{name}",
            delete(partitions::delete_partition),
        )
        .route("/openstack/flavors", get(openstack::list_flavors))
        .route(
            "/cache",
            get(cache::list_caches).delete(cache::invalidate_all),
        )
        .route("/cache/purge", post(cache::purge_expired))
        .route("/cache/{name}", delete(cache::invalidate_cache))
        .with_state(state);

    Router::new()
        .merge(app_router)
        .merge(metrics_router)
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
        .layer(middleware_stack)
}

/// Serves the router on `addr` until Ctrl+C or SIGTERM.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = create_router(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
