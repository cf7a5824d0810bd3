//! Integration tests for the status and health endpoints.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_status_reports_working() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/status", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "System is working fine");
    let at = response.body["responseAt"].as_str().unwrap();
    assert!(at.ends_with('Z'));
    assert_eq!(at.len(), "2024-01-01T00:00:00.000Z".len());
}

#[tokio::test]
async fn test_health_with_memory_store() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/unknown", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
