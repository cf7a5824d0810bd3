//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use scanlog_core::config::AppConfig;
use scanlog_core::error::AppError;
use scanlog_database::Store;
use scanlog_service::scan_result::ScanResultService;
use scanlog_service::status::StatusService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Scan result use cases
    pub scan_result_service: Arc<ScanResultService>,
    /// Status and health reporting
    pub status_service: Arc<StatusService>,
}

impl AppState {
    /// Wire the services on top of an opened store.
    pub fn new(config: Arc<AppConfig>, store: &Store) -> Result<Self, AppError> {
        let scan_result_service = Arc::new(ScanResultService::new(
            store.scan_results(),
            &config.query,
            &config.server.base_url,
        )?);
        let status_service = Arc::new(StatusService::new(
            store.scan_results(),
            env!("CARGO_PKG_VERSION"),
        ));

        Ok(Self {
            config,
            scan_result_service,
            status_service,
        })
    }
}
