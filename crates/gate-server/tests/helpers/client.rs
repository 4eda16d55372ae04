//! In-process HTTP client for the router.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use gate_server::cache::{CacheRegistry, CacheSettings};
use gate_server::metrics::setup::detached_handle;
use gate_server::{AppState, create_router};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::providers::{FakeAzure, FakeOpenStack};

/// Azure credential headers accepted by [`FakeAzure`].
pub const AZURE_HEADERS: [(&str, &str); 3] = [
    ("subscriptionid", "sub-1"),
    ("tenantid", "tenant-1"),
    ("appid", "app-1"),
];

pub const AZURE_SECRET_BODY: &str = r#"{"secret": "s3cr3t"}"#;

pub struct TestClient {
    app: Router,
    pub state: AppState,
}

impl TestClient {
    pub fn new(state: AppState) -> Self {
        let app = create_router(state.clone(), detached_handle());
        Self { app, state }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, &[], Body::empty()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, &[], Body::empty()).await
    }

    pub async fn get_with_headers(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.send("GET", uri, headers, Body::empty()).await
    }

    /// Sends an Azure request: credential headers, the secret body and any `extra` headers.
    pub async fn azure(&self, method: &str, uri: &str, extra: &[(&str, &str)]) -> TestResponse {
        let headers: Vec<(&str, &str)> = AZURE_HEADERS.iter().chain(extra).copied().collect();
        self.send(method, uri, &headers, Body::from(AZURE_SECRET_BODY))
            .await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &[(&str, &str)],
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().uri(uri).method(method);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type")) {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .expect("Request failed");

        TestResponse::from_response(response).await
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Body is not valid UTF-8")
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    pub fn assert_content_type_contains(&self, expected: &str) -> &Self {
        let content_type = self
            .header("content-type")
            .expect("Response missing Content-Type header");

        assert!(
            content_type.contains(expected),
            "Expected Content-Type to contain '{}' but got '{}'",
            expected,
            content_type
        );
        self
    }

    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        assert_eq!(self.header(name), Some(expected), "Header '{}'", name);
        self
    }
}

/// Client over fresh fakes and a 60 second flavor cache.
pub fn client() -> TestClient {
    client_with(FakeAzure::default(), FakeOpenStack::default())
}

pub fn client_with(azure: FakeAzure, openstack: FakeOpenStack) -> TestClient {
    let caches = Arc::new(CacheRegistry::new(CacheSettings::default()));
    TestClient::new(AppState::new(caches, Arc::new(azure), Arc::new(openstack)))
}
