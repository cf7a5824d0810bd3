//! Security scan result handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use scanlog_core::error::AppError;
use scanlog_entity::scan_result::{NewScanResult, ScanResult};

use crate::dto::request::CreateScanResultRequest;
use crate::error::ApiError;
use crate::extractors::{ScanResultListRequest, ValidatedJson};
use crate::state::AppState;

/// Total number of matching records, sent with every list response.
pub const ITEMS_COUNT_HEADER: HeaderName = HeaderName::from_static("x-items-count");

/// JSON page links, sent with every list response.
pub const PAGE_LINKS_HEADER: HeaderName = HeaderName::from_static("x-page-links");

/// POST /api/scan-result
pub async fn create_scan_result(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateScanResultRequest>,
) -> Result<(StatusCode, Json<ScanResult>), ApiError> {
    let stored = state
        .scan_result_service
        .create(NewScanResult::from(req))
        .await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/scan-result
///
/// Responds 204 with the count and link headers when the requested page
/// is empty, even if earlier pages hold records.
pub async fn list_scan_results(
    State(state): State<AppState>,
    request: ScanResultListRequest,
) -> Result<Response, ApiError> {
    let page = state
        .scan_result_service
        .list(&request.params, request.query.page_request(), &request.route)
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(ITEMS_COUNT_HEADER, HeaderValue::from(page.total_count));
    let links = page.links.to_header_value()?;
    headers.insert(
        PAGE_LINKS_HEADER,
        HeaderValue::from_str(&links)
            .map_err(|_| AppError::internal("Page links are not a valid header value"))?,
    );

    if page.items.is_empty() {
        return Ok((StatusCode::NO_CONTENT, headers).into_response());
    }
    Ok((StatusCode::OK, headers, Json(page.items)).into_response())
}

/// GET /api/scan-result/{result_id}
pub async fn get_scan_result(
    State(state): State<AppState>,
    Path(result_id): Path<String>,
) -> Result<Json<ScanResult>, ApiError> {
    let record = state.scan_result_service.get(&result_id).await?;
    Ok(Json(record))
}
