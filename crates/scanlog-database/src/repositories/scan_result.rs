//! Scan result repository implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind as MongoErrorKind, WriteFailure};
use mongodb::{Collection, Database};

use scanlog_core::error::{AppError, ErrorKind};
use scanlog_core::result::AppResult;
use scanlog_core::traits::Repository;
use scanlog_core::types::filter::Filter;
use scanlog_core::types::pagination::PageRequest;
use scanlog_core::types::sorting::SortSpec;
use scanlog_entity::scan_result::{COLLECTION, ScanResult};

use super::document::ScanResultDocument;
use super::query::{filter_document, sort_document};

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Repository for scan result documents in MongoDB.
#[derive(Debug, Clone)]
pub struct ScanResultRepository {
    db: Database,
    collection: Collection<ScanResultDocument>,
}

impl ScanResultRepository {
    /// Create a new scan result repository.
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ScanResultDocument>(COLLECTION);
        Self { db, collection }
    }
}

#[async_trait]
impl Repository<ScanResult> for ScanResultRepository {
    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        self.collection
            .count_documents(filter_document(filter))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count scan results", e)
            })
    }

    async fn find_page(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> AppResult<Vec<ScanResult>> {
        let limit = i64::try_from(page.limit())
            .map_err(|_| AppError::validation("itemsPerPage is too large"))?;

        let mut find = self
            .collection
            .find(filter_document(filter))
            .skip(page.offset())
            .limit(limit);
        if !sort.is_empty() {
            find = find.sort(sort_document(sort));
        }

        let cursor = find.await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list scan results", e)
        })?;
        let documents: Vec<ScanResultDocument> = cursor.try_collect().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read scan results", e)
        })?;
        documents.into_iter().map(ScanResult::try_from).collect()
    }

    async fn insert(&self, entity: &ScanResult) -> AppResult<ScanResult> {
        let document = ScanResultDocument::from(entity);
        self.collection.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("Scan result {} already exists", entity.id),
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create scan result", e)
            }
        })?;
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<ScanResult>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find scan result", e))?
            .map(ScanResult::try_from)
            .transpose()
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        MongoErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY
    )
}
