//! Paged query execution against a [`Repository`].

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{AppError, ErrorKind};
use crate::traits::repository::Repository;
use crate::types::filter::Filter;
use crate::types::pagination::{PageRequest, PagedResult};
use crate::types::sorting::SortSpec;

/// Filter, sort order and page window of one list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedQuery {
    /// Equality/membership constraints.
    pub filter: Filter,
    /// Result ordering; empty leaves the order to the store.
    pub sort: SortSpec,
    /// Requested page window.
    pub page: PageRequest,
}

impl PagedQuery {
    /// Create a new paged query.
    pub fn new(filter: Filter, sort: SortSpec, page: PageRequest) -> Self {
        Self { filter, sort, page }
    }
}

/// Runs the count and the page fetch of a [`PagedQuery`] together.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagedQueryExecutor;

impl PagedQueryExecutor {
    /// Execute `query` against `repo`.
    ///
    /// The count and the page fetch are issued concurrently and both must
    /// succeed; the first failure aborts the whole operation and is
    /// returned as a single database error carrying the store error as its
    /// source. No partial result is ever returned.
    pub async fn execute<T, R>(repo: &R, query: &PagedQuery) -> Result<PagedResult<T>, AppError>
    where
        T: Send + Sync + 'static,
        R: Repository<T> + ?Sized,
    {
        query.page.ensure_positive()?;

        let count = repo.count(&query.filter);
        let page = repo.find_page(&query.filter, &query.sort, &query.page);

        match futures::try_join!(count, page) {
            Ok((count, list_data)) => {
                debug!(
                    count,
                    returned = list_data.len(),
                    page = query.page.page,
                    items_per_page = query.page.items_per_page,
                    "Paged query completed"
                );
                Ok(PagedResult::new(count, list_data))
            }
            Err(e) => {
                error!(
                    filter = ?query.filter,
                    sort = ?query.sort,
                    page = query.page.page,
                    items_per_page = query.page.items_per_page,
                    error = %e,
                    "An error occurred while performing pagination"
                );
                Err(e.wrap(ErrorKind::Database, "Paged query failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use crate::result::AppResult;
    use crate::types::sorting::SortDirection;

    /// Repository whose count and page fetch both wait on one barrier, so
    /// the test deadlocks unless the two calls run concurrently.
    struct BarrierRepo {
        barrier: Barrier,
        rows: Vec<u32>,
        fail_count: bool,
        fail_find: bool,
        seen: Mutex<Vec<(Filter, SortSpec, PageRequest)>>,
    }

    impl BarrierRepo {
        fn new(rows: Vec<u32>) -> Self {
            Self {
                barrier: Barrier::new(2),
                rows,
                fail_count: false,
                fail_find: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Repository<u32> for BarrierRepo {
        async fn count(&self, _filter: &Filter) -> AppResult<u64> {
            self.barrier.wait().await;
            if self.fail_count {
                return Err(AppError::database("count failed"));
            }
            Ok(self.rows.len() as u64)
        }

        async fn find_page(
            &self,
            filter: &Filter,
            sort: &SortSpec,
            page: &PageRequest,
        ) -> AppResult<Vec<u32>> {
            self.seen
                .lock()
                .unwrap()
                .push((filter.clone(), sort.clone(), *page));
            self.barrier.wait().await;
            if self.fail_find {
                return Err(AppError::database("find failed"));
            }
            Ok(self
                .rows
                .iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .copied()
                .collect())
        }

        async fn insert(&self, entity: &u32) -> AppResult<u32> {
            Ok(*entity)
        }

        async fn find_by_id(&self, _id: &str) -> AppResult<Option<u32>> {
            Ok(None)
        }

        async fn health_check(&self) -> AppResult<()> {
            Ok(())
        }
    }

    fn query(page: u64, items_per_page: u64) -> PagedQuery {
        PagedQuery::new(
            Filter::new().with("Status", "Queued"),
            SortSpec::new().with("QueuedAt", SortDirection::Desc),
            PageRequest::new(page, items_per_page),
        )
    }

    async fn run(repo: &BarrierRepo, q: &PagedQuery) -> AppResult<PagedResult<u32>> {
        tokio::time::timeout(Duration::from_secs(5), PagedQueryExecutor::execute(repo, q))
            .await
            .expect("count and find_page must run concurrently")
    }

    #[tokio::test]
    async fn test_returns_count_and_page() {
        let repo = BarrierRepo::new((1..=25).collect());
        let result = run(&repo, &query(2, 20)).await.unwrap();
        assert_eq!(result.count, 25);
        assert_eq!(result.list_data, vec![21, 22, 23, 24, 25]);

        let seen = repo.seen.lock().unwrap();
        assert_eq!(seen[0].0, Filter::new().with("Status", "Queued"));
        assert_eq!(seen[0].1.direction("QueuedAt"), Some(SortDirection::Desc));
        assert_eq!(seen[0].2, PageRequest::new(2, 20));
    }

    #[tokio::test]
    async fn test_page_beyond_range_is_empty_not_error() {
        let repo = BarrierRepo::new((1..=5).collect());
        let result = run(&repo, &query(3, 20)).await.unwrap();
        assert_eq!(result.count, 5);
        assert!(result.is_empty_page());
    }

    #[tokio::test]
    async fn test_count_failure_fails_whole_query() {
        let mut repo = BarrierRepo::new((1..=5).collect());
        repo.fail_count = true;
        let err = run(&repo, &query(1, 20)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(err.source.is_some());
    }

    #[tokio::test]
    async fn test_find_failure_fails_whole_query() {
        let mut repo = BarrierRepo::new((1..=5).collect());
        repo.fail_find = true;
        let err = run(&repo, &query(1, 20)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected_before_store() {
        let repo = BarrierRepo::new(vec![1]);
        let err = PagedQueryExecutor::execute(&repo, &query(1, 0))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(repo.seen.lock().unwrap().is_empty());
    }
}
