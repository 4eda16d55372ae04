//! Cache administration endpoints.

mod helpers;

use axum::http::StatusCode;
use helpers::*;
use serde_json::Value;

async fn warm(client: &TestClient) {
    for location in ["location=eastus", "location=westus"] {
        client
            .azure("GET", "/azure/flavors", &[("extra", location)])
            .await
            .assert_status(StatusCode::OK);
    }
}

#[tokio::test]
async fn lists_cache_stats() {
    let client = client();
    warm(&client).await;

    let json: Value = client.get("/cache").await.json();
    let caches = json["caches"].as_array().unwrap();

    assert_eq!(caches.len(), 1);
    assert_eq!(caches[0]["name"], "flavors");
    assert_eq!(caches[0]["entries"], 2);
    assert_eq!(caches[0]["ttl_seconds"], 60);
}

#[tokio::test]
async fn invalidate_all_empties_caches() {
    let azure = FakeAzure::default();
    let client = client_with(azure.clone(), FakeOpenStack::default());
    warm(&client).await;

    let response = client.delete("/cache").await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["invalidated"], 2);

    client
        .azure("GET", "/azure/flavors", &[("extra", "location=eastus")])
        .await;
    assert_eq!(azure.size_calls(), 3);
}

#[tokio::test]
async fn invalidate_named_cache() {
    let client = client();
    warm(&client).await;

    let json: Value = client.delete("/cache/flavors").await.json();

    assert_eq!(json["invalidated"], 2);
    assert!(client.state.flavors_cache().unwrap().is_empty());
}

#[tokio::test]
async fn invalidate_unknown_cache_returns_404() {
    client()
        .delete("/cache/images")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn purge_removes_only_expired_entries() {
    let client = client();
    client
        .azure("GET", "/azure/flavors", &[("extra", "location=eastus")])
        .await;

    tokio::time::advance(std::time::Duration::from_secs(45)).await;
    client
        .azure("GET", "/azure/flavors", &[("extra", "location=westus")])
        .await;
    tokio::time::advance(std::time::Duration::from_secs(20)).await;

    let response = client.send("POST", "/cache/purge", &[], axum::body::Body::empty()).await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["invalidated"], 1);
    assert_eq!(client.state.flavors_cache().unwrap().len(), 1);
}
