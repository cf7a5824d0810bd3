//! Generic repository trait for document-store access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::filter::Filter;
use crate::types::pagination::PageRequest;
use crate::types::sorting::SortSpec;

/// Store operations a collection of `Entity` documents must support.
///
/// Reads are lean: implementations hand back plain deserialized values,
/// never store-native handles.
#[async_trait]
pub trait Repository<Entity>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
{
    /// Count the documents matching `filter`.
    async fn count(&self, filter: &Filter) -> AppResult<u64>;

    /// Fetch one page of documents matching `filter`, ordered by `sort`.
    ///
    /// An empty `sort` leaves the order to the store.
    async fn find_page(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> AppResult<Vec<Entity>>;

    /// Persist a new document and return it as stored.
    async fn insert(&self, entity: &Entity) -> AppResult<Entity>;

    /// Fetch a document by its identifier.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Entity>>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}
