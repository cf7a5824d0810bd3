//! System status and health reporting.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use scanlog_core::traits::Repository;
use scanlog_entity::scan_result::ScanResult;

/// Liveness answer returned by the status endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// Fixed liveness message.
    pub message: String,
    /// When the answer was produced.
    #[serde(with = "scanlog_entity::timestamp")]
    pub response_at: DateTime<Utc>,
}

/// Readiness answer including store connectivity.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// `"ok"` when every dependency is reachable, `"degraded"` otherwise.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `"connected"` or `"unavailable"`.
    pub database: String,
}

impl HealthReport {
    /// Whether every dependency is reachable.
    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}

/// Reports whether the service and its store are up.
#[derive(Clone)]
pub struct StatusService {
    /// Repository pinged by the health check.
    repo: Arc<dyn Repository<ScanResult>>,
    /// Server version.
    version: String,
}

impl std::fmt::Debug for StatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusService")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl StatusService {
    /// Creates a new status service.
    pub fn new(repo: Arc<dyn Repository<ScanResult>>, version: impl Into<String>) -> Self {
        Self {
            repo,
            version: version.into(),
        }
    }

    /// Liveness: answers without touching the store.
    pub fn status(&self) -> SystemStatus {
        info!("Get system status inquiry request received and successfully completed");
        SystemStatus {
            message: "System is working fine".to_string(),
            response_at: Utc::now(),
        }
    }

    /// Readiness: pings the store.
    pub async fn health(&self) -> HealthReport {
        let database = match self.repo.health_check().await {
            Ok(()) => "connected",
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                "unavailable"
            }
        };
        HealthReport {
            status: if database == "connected" { "ok" } else { "degraded" }.to_string(),
            version: self.version.clone(),
            database: database.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlog_database::repositories::MemoryRepository;

    #[test]
    fn test_status_message() {
        let svc = StatusService::new(Arc::new(MemoryRepository::<ScanResult>::new()), "0.1.0");
        let status = svc.status();
        assert_eq!(status.message, "System is working fine");

        let json = serde_json::to_value(&status).unwrap();
        assert!(json["responseAt"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_health_with_reachable_store() {
        let svc = StatusService::new(Arc::new(MemoryRepository::<ScanResult>::new()), "0.1.0");
        let report = svc.health().await;
        assert!(report.is_healthy());
        assert_eq!(report.database, "connected");
        assert_eq!(report.version, "0.1.0");
    }
}
