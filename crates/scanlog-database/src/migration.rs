//! Collection migration runner.
//!
//! Migrations are applied in order, once each. Applied steps are recorded
//! in the `migrations` collection by id.

use chrono::Utc;
use mongodb::bson::{Document, doc};
use mongodb::{Database, IndexModel};
use tracing::info;

use scanlog_core::error::{AppError, ErrorKind};
use scanlog_entity::scan_result::{COLLECTION, ScanResult};

/// Collection recording applied migrations.
pub const MIGRATIONS_COLLECTION: &str = "migrations";

/// A named schema step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// Create the scan result collection.
    CreateScanResultCollection,
    /// Index the fields list requests filter on.
    IndexScanResultFilters,
}

impl Migration {
    /// All migrations in application order.
    pub const ALL: [Migration; 2] = [
        Self::CreateScanResultCollection,
        Self::IndexScanResultFilters,
    ];

    /// Stable identifier recorded once the step is applied.
    pub fn id(&self) -> &'static str {
        match self {
            Self::CreateScanResultCollection => "0001-create-security-scan-result-collection",
            Self::IndexScanResultFilters => "0002-index-scan-result-filters",
        }
    }

    async fn apply(&self, db: &Database) -> Result<(), mongodb::error::Error> {
        match self {
            Self::CreateScanResultCollection => {
                let existing = db.list_collection_names().await?;
                if !existing.iter().any(|name| name == COLLECTION) {
                    db.create_collection(COLLECTION).await?;
                }
            }
            Self::IndexScanResultFilters => {
                db.collection::<Document>(COLLECTION)
                    .create_indexes(filter_indexes())
                    .await?;
            }
        }
        Ok(())
    }
}

/// One ascending index per filterable scan result field.
fn filter_indexes() -> Vec<IndexModel> {
    ScanResult::FILTERABLE_FIELDS
        .iter()
        .map(|field| {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            IndexModel::builder().keys(keys).build()
        })
        .collect()
}

/// Migrations not yet in `applied`, in application order.
pub fn pending(applied: &[String]) -> Vec<Migration> {
    Migration::ALL
        .into_iter()
        .filter(|m| !applied.iter().any(|id| id == m.id()))
        .collect()
}

/// Run all pending migrations.
pub async fn run_migrations(db: &Database) -> Result<(), AppError> {
    info!("Running database migrations...");

    let records = db.collection::<Document>(MIGRATIONS_COLLECTION);
    let applied: Vec<String> = records
        .distinct("_id", doc! {})
        .await
        .map_err(|e| migration_error("Failed to read applied migrations", e))?
        .into_iter()
        .filter_map(|id| id.as_str().map(str::to_string))
        .collect();

    for migration in pending(&applied) {
        info!(migration = migration.id(), "Applying migration");
        migration
            .apply(db)
            .await
            .map_err(|e| migration_error(&format!("Migration {} failed", migration.id()), e))?;
        records
            .insert_one(doc! {
                "_id": migration.id(),
                "appliedAt": scanlog_entity::timestamp::format(&Utc::now()),
            })
            .await
            .map_err(|e| migration_error("Failed to record migration", e))?;
    }

    info!("Database migrations completed successfully");
    Ok(())
}

fn migration_error(message: &str, e: mongodb::error::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, format!("{message}: {e}"), e)
}
