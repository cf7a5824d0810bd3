//! Database configuration.

use serde::{Deserialize, Serialize};

/// Document store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store provider: `"mongodb"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// MongoDB connection URL. Overridden by the `MONGO_URL` environment variable.
    #[serde(default = "default_url")]
    pub url: String,
    /// Database name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Application name reported to the server.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Whether to apply pending collection migrations on start-up.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: default_url(),
            name: default_name(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
            app_name: default_app_name(),
            run_migrations: default_true(),
        }
    }
}

fn default_provider() -> String {
    "mongodb".to_string()
}

fn default_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_name() -> String {
    "scanlog".to_string()
}

fn default_max_pool_size() -> u32 {
    20
}

fn default_min_pool_size() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_app_name() -> String {
    "scanlog".to_string()
}

fn default_true() -> bool {
    true
}
