//! MongoDB client management.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

use scanlog_core::config::DatabaseConfig;
use scanlog_core::error::{AppError, ErrorKind};

/// Wrapper around a MongoDB client bound to one database.
#[derive(Debug, Clone)]
pub struct MongoConnection {
    /// The underlying driver client (owns the connection pool).
    client: Client,
    /// The application database.
    database: Database,
}

impl MongoConnection {
    /// Connect to MongoDB from configuration and verify with a ping.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            database = %config.name,
            max_pool_size = config.max_pool_size,
            min_pool_size = config.min_pool_size,
            "Connecting to MongoDB"
        );

        let mut options = ClientOptions::parse(&config.url).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid MongoDB connection URL: {e}"),
                e,
            )
        })?;
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_seconds));
        options.server_selection_timeout =
            Some(Duration::from_secs(config.connect_timeout_seconds));
        options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(options).map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create MongoDB client: {e}"),
                e,
            )
        })?;
        let database = client.database(&config.name);
        let connection = Self { client, database };

        connection
            .ping()
            .await
            .map_err(|e| e.wrap(ErrorKind::Database, "Failed to connect to database"))?;

        info!("Successfully connected to MongoDB");
        Ok(connection)
    }

    /// Return the application database handle.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.ping().await
    }

    /// Shut the client down, waiting for in-flight operations.
    pub async fn close(self) {
        self.client.shutdown().await;
        info!("MongoDB client closed");
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// Mask the password portion of a connection URL for safe logging.
pub(crate) fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
        if at_pos > scheme_end {
            if let Some(colon_pos) = url[scheme_end..at_pos].find(':') {
                let colon_pos = scheme_end + colon_pos;
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
