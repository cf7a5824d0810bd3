//! Route definitions for the ScanLog HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(scan_result_routes())
        .merge(status_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Scan result endpoints: create, list, get
fn scan_result_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/scan-result",
            get(handlers::scan_result::list_scan_results)
                .post(handlers::scan_result::create_scan_result),
        )
        .route(
            "/scan-result/{result_id}",
            get(handlers::scan_result::get_scan_result),
        )
}

/// Status endpoints: liveness and readiness
fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::status::status))
        .route("/health", get(handlers::status::health))
}
