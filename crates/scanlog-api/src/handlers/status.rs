//! Status and health check handlers.

use axum::Json;
use axum::extract::State;

use scanlog_service::status::{HealthReport, SystemStatus};

use crate::state::AppState;

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(state.status_service.status())
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.status_service.health().await)
}
