//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use scanlog_api::{AppState, build_app};
use scanlog_core::config::AppConfig;
use scanlog_database::Store;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application backed by an empty in-memory store
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = Store::memory();
        let state =
            AppState::new(Arc::new(config.clone()), &store).expect("Failed to build app state");
        Self {
            router: build_app(state),
            config,
        }
    }

    /// Store a scan result through the API and return its id
    pub async fn create_scan_result(&self, repository_name: &str, status: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/scan-result",
                Some(scan_result_body(repository_name, status)),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["_id"]
            .as_str()
            .expect("Created record has no id")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.send_raw(method, path, body_str).await
    }

    /// Make an HTTP request with a raw body
    pub async fn send_raw(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A minimal valid create body with one finding
pub fn scan_result_body(repository_name: &str, status: &str) -> Value {
    json!({
        "RepositoryName": repository_name,
        "Status": status,
        "Findings": [
            {
                "type": "sast",
                "ruleId": "G402",
                "location": {
                    "path": "connectors/apigateway.go",
                    "positions": { "begin": { "line": 60 } }
                },
                "metadata": {
                    "description": "TLS InsecureSkipVerify set true.",
                    "severity": "HIGH"
                }
            }
        ]
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Total count reported by a list response
    pub fn items_count(&self) -> u64 {
        self.header("x-items-count")
            .and_then(|v| v.parse().ok())
            .expect("Missing x-items-count header")
    }

    /// Page links reported by a list response
    pub fn page_links(&self) -> Value {
        let raw = self
            .header("x-page-links")
            .expect("Missing x-page-links header");
        serde_json::from_str(raw).expect("Page links are not JSON")
    }
}
