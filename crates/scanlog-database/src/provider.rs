//! Store selection from configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use scanlog_core::config::DatabaseConfig;
use scanlog_core::error::AppError;
use scanlog_core::result::AppResult;
use scanlog_core::traits::Repository;
use scanlog_entity::scan_result::ScanResult;

use crate::connection::MongoConnection;
use crate::migration;
use crate::repositories::{MemoryRepository, ScanResultRepository};

/// Backing document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreProvider {
    /// MongoDB server.
    MongoDb,
    /// Process memory; nothing survives a restart.
    Memory,
}

impl StoreProvider {
    /// Return the configuration name of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MongoDb => "mongodb",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StoreProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(AppError::configuration(format!(
                "Unsupported database provider: '{s}'. Expected one of: mongodb, memory"
            ))),
        }
    }
}

/// Opened document store and the repositories built on it.
#[derive(Clone)]
pub struct Store {
    provider: StoreProvider,
    connection: Option<MongoConnection>,
    scan_results: Arc<dyn Repository<ScanResult>>,
}

impl Store {
    /// Open the store selected by `config.provider`.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.parse::<StoreProvider>()? {
            StoreProvider::MongoDb => {
                let connection = MongoConnection::connect(config).await?;
                let scan_results = Arc::new(ScanResultRepository::new(
                    connection.database().clone(),
                ));
                Ok(Self {
                    provider: StoreProvider::MongoDb,
                    connection: Some(connection),
                    scan_results,
                })
            }
            StoreProvider::Memory => Ok(Self::memory()),
        }
    }

    /// Create an empty in-memory store.
    pub fn memory() -> Self {
        info!("Using in-memory document store");
        Self {
            provider: StoreProvider::Memory,
            connection: None,
            scan_results: Arc::new(MemoryRepository::<ScanResult>::new()),
        }
    }

    /// The provider backing this store.
    pub fn provider(&self) -> StoreProvider {
        self.provider
    }

    /// Scan result repository.
    pub fn scan_results(&self) -> Arc<dyn Repository<ScanResult>> {
        Arc::clone(&self.scan_results)
    }

    /// Apply pending migrations; the in-memory store has none.
    pub async fn migrate(&self) -> AppResult<()> {
        match &self.connection {
            Some(connection) => migration::run_migrations(connection.database()).await,
            None => Ok(()),
        }
    }

    /// Release the underlying connection, if any.
    pub async fn close(self) {
        if let Some(connection) = self.connection {
            connection.close().await;
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlog_core::error::ErrorKind;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("mongodb".parse::<StoreProvider>().unwrap(), StoreProvider::MongoDb);
        assert_eq!("Memory".parse::<StoreProvider>().unwrap(), StoreProvider::Memory);
        let err = "postgres".parse::<StoreProvider>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = DatabaseConfig {
            provider: "memory".to_string(),
            ..DatabaseConfig::default()
        };
        let store = Store::open(&config).await.unwrap();
        assert_eq!(store.provider(), StoreProvider::Memory);
        assert!(store.migrate().await.is_ok());
        assert!(store.scan_results().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_open_unknown_provider_fails() {
        let config = DatabaseConfig {
            provider: "sqlite".to_string(),
            ..DatabaseConfig::default()
        };
        let err = Store::open(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
