//! Integration tests for the security scan result endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, scan_result_body};

#[tokio::test]
async fn test_create_scan_result() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/scan-result",
            Some(scan_result_body("payments-api", "Queued")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["_id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(response.body["RepositoryName"], "payments-api");
    assert_eq!(response.body["Status"], "Queued");
    assert_eq!(response.body["Findings"][0]["ruleId"], "G402");
    assert_eq!(response.body["QueuedAt"], response.body["createdAt"]);
    assert!(response.body.get("FinishedAt").is_none());
}

#[tokio::test]
async fn test_create_keeps_supplied_timestamps() {
    let app = TestApp::new();

    let mut body = scan_result_body("payments-api", "Success");
    body["QueuedAt"] = json!("2024-03-01T10:00:00.000Z");
    body["FinishedAt"] = json!("2024-03-01T10:05:30.250Z");

    let response = app.request("POST", "/api/scan-result", Some(body)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["QueuedAt"], "2024-03-01T10:00:00.000Z");
    assert_eq!(response.body["FinishedAt"], "2024-03-01T10:05:30.250Z");
}

#[tokio::test]
async fn test_create_rejects_blank_repository_name() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/scan-result",
            Some(scan_result_body("   ", "Queued")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_unknown_status() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/scan-result",
            Some(scan_result_body("payments-api", "Paused")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = TestApp::new();

    let response = app
        .send_raw("POST", "/api/scan-result", "{\"RepositoryName\":".to_string())
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_scan_result_by_id() {
    let app = TestApp::new();
    let id = app.create_scan_result("payments-api", "In Progress").await;

    let response = app
        .request("GET", &format!("/api/scan-result/{id}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_id"], id.as_str());
    assert_eq!(response.body["Status"], "In Progress");
}

#[tokio::test]
async fn test_get_scan_result_not_found() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/scan-result/5df4a0f4c2b1e8a1b2c3d4e5", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_scan_result_malformed_id() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/scan-result/not-an-id", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_single_page() {
    let app = TestApp::new();
    app.create_scan_result("payments-api", "Queued").await;

    let response = app
        .request("GET", "/api/scan-result?page=1&itemsPerPage=20", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items_count(), 1);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    let links = response.page_links();
    let only = "http://localhost:8080/api/scan-result?page=1&itemsPerPage=20";
    assert_eq!(links["first"], only);
    assert_eq!(links["last"], only);
    assert!(links.get("prev").is_none());
    assert!(links.get("next").is_none());
}

#[tokio::test]
async fn test_list_uses_default_page_size() {
    let app = TestApp::new();
    app.create_scan_result("payments-api", "Queued").await;

    let response = app.request("GET", "/api/scan-result", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.page_links()["first"],
        "http://localhost:8080/api/scan-result?page=1&itemsPerPage=20"
    );
}

#[tokio::test]
async fn test_list_middle_page_links_keep_filters() {
    let app = TestApp::new();
    for name in ["a", "b", "c", "d", "e"] {
        app.create_scan_result(name, "Success").await;
    }
    app.create_scan_result("f", "Failure").await;

    let response = app
        .request(
            "GET",
            "/api/scan-result?Status=Success&page=2&itemsPerPage=2",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items_count(), 5);
    assert_eq!(response.body.as_array().unwrap().len(), 2);

    let links = response.page_links();
    let base = "http://localhost:8080/api/scan-result?Status=Success";
    assert_eq!(links["first"], format!("{base}&page=1&itemsPerPage=2"));
    assert_eq!(links["prev"], format!("{base}&page=1&itemsPerPage=2"));
    assert_eq!(links["next"], format!("{base}&page=3&itemsPerPage=2"));
    assert_eq!(links["last"], format!("{base}&page=3&itemsPerPage=2"));
}

#[tokio::test]
async fn test_list_page_beyond_range_is_no_content() {
    let app = TestApp::new();
    app.create_scan_result("payments-api", "Queued").await;
    app.create_scan_result("orders-api", "Queued").await;

    let response = app
        .request("GET", "/api/scan-result?page=5&itemsPerPage=20", None)
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.items_count(), 2);
    assert!(response.header("x-page-links").is_some());
}

#[tokio::test]
async fn test_list_empty_collection_is_no_content() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/scan-result", None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.items_count(), 0);
}

#[tokio::test]
async fn test_list_filters_by_repository_and_status() {
    let app = TestApp::new();
    app.create_scan_result("payments-api", "Success").await;
    app.create_scan_result("payments-api", "Failure").await;
    app.create_scan_result("orders-api", "Success").await;

    let response = app
        .request(
            "GET",
            "/api/scan-result?RepositoryName=payments-api&Status=Success",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items_count(), 1);
    assert_eq!(response.body[0]["RepositoryName"], "payments-api");
    assert_eq!(response.body[0]["Status"], "Success");
}

#[tokio::test]
async fn test_list_filters_by_several_statuses() {
    let app = TestApp::new();
    app.create_scan_result("a", "Queued").await;
    app.create_scan_result("b", "In Progress").await;
    app.create_scan_result("c", "Success").await;

    let response = app
        .request(
            "GET",
            "/api/scan-result?Status=Queued&Status=In%20Progress",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items_count(), 2);
}

#[tokio::test]
async fn test_list_sorts_descending() {
    let app = TestApp::new();
    for name in ["beta", "alpha", "gamma"] {
        app.create_scan_result(name, "Queued").await;
    }

    let response = app
        .request("GET", "/api/scan-result?sortBy=-RepositoryName", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["RepositoryName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["gamma", "beta", "alpha"]);
}

#[tokio::test]
async fn test_list_rejects_unknown_sort_field() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/scan-result?sortBy=Findings", None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_invalid_page_window() {
    let app = TestApp::new();

    for query in [
        "page=0",
        "itemsPerPage=0",
        "itemsPerPage=101",
        "page=abc",
        "page=18446744073709551615",
    ] {
        let response = app
            .request("GET", &format!("/api/scan-result?{query}"), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
    }
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/scan-result", None).await;

    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_list_huge_page_is_rejected_with_records_present() {
    let app = TestApp::new();
    for name in ["a", "b", "c"] {
        app.create_scan_result(name, "Queued").await;
    }

    let response = app
        .request(
            "GET",
            "/api/scan-result?page=18446744073709551615&itemsPerPage=1",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
