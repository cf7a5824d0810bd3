//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;
pub mod query;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::query::QueryConfig;

use crate::error::AppError;

/// Environment variable that selects the configuration overlay.
pub const ENV_VAR: &str = "SCANLOG_ENV";

/// Environment variable that overrides `database.url`.
pub const MONGO_URL_VAR: &str = "MONGO_URL";

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    /// Local development (the default when nothing is set).
    Development,
    /// Automated test runs.
    Testing,
    /// Continuous integration.
    Ci,
    /// Production deployment.
    Production,
}

impl AppEnvironment {
    /// Resolve the environment from [`ENV_VAR`].
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var(ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::Development),
        }
    }

    /// Return the environment as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Ci => "ci",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppEnvironment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "testing" => Ok(Self::Testing),
            "ci" => Ok(Self::Ci),
            "production" => Ok(Self::Production),
            _ => Err(AppError::configuration(format!(
                "Unsupported environment: '{s}'. Expected one of: development, testing, ci, production"
            ))),
        }
    }
}

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// List-query parameter settings.
    #[serde(default)]
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SCANLOG__`.
    pub fn load(env: AppEnvironment) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from TOML files found in `dir`.
    pub fn load_from(dir: &str, env: AppEnvironment) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SCANLOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        if let Ok(url) = std::env::var(MONGO_URL_VAR) {
            if !url.trim().is_empty() {
                loaded.database.url = url;
            }
        }

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.query.default_items_per_page == 0 || self.query.max_items_per_page == 0 {
            return Err(AppError::configuration(
                "query.default_items_per_page and query.max_items_per_page must be positive",
            ));
        }
        if self.query.default_items_per_page > self.query.max_items_per_page {
            return Err(AppError::configuration(
                "query.default_items_per_page exceeds query.max_items_per_page",
            ));
        }
        url::Url::parse(&self.server.base_url).map_err(|e| {
            AppError::with_source(
                crate::error::ErrorKind::Configuration,
                format!("Invalid server.base_url '{}'", self.server.base_url),
                e,
            )
        })?;
        Ok(())
    }
}
