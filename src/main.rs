//! ScanLog Server: security scan result registry.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use scanlog_core::config::{AppConfig, AppEnvironment};
use scanlog_core::error::AppError;
use scanlog_database::Store;

#[tokio::main]
async fn main() {
    let (env, config) = match load_configuration() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(environment = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<(AppEnvironment, AppConfig), AppError> {
    let env = AppEnvironment::from_env()?;
    let config = AppConfig::load(env)?;
    Ok((env, config))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ScanLog v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        provider = %config.database.provider,
        "Opening document store..."
    );
    let store = Store::open(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running collection migrations...");
        if let Err(e) = store.migrate().await {
            store.close().await;
            return Err(e);
        }
        tracing::info!("Collection migrations complete");
    }

    scanlog_api::run_server(config, store).await
}
