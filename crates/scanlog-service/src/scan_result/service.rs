//! Create, list and fetch security scan results.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info};

use scanlog_core::config::QueryConfig;
use scanlog_core::error::{AppError, ErrorKind};
use scanlog_core::query::{PageLinkBuilder, PagedQuery, PagedQueryExecutor, QueryTranslator};
use scanlog_core::traits::Repository;
use scanlog_core::types::links::PageLinks;
use scanlog_core::types::pagination::PageRequest;
use scanlog_core::types::params::ParameterSet;
use scanlog_entity::scan_result::{NewScanResult, ScanResult, ScanResultId};

/// One page of scan results with navigation data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultPage {
    /// Records on the requested page; empty past the last page.
    pub items: Vec<ScanResult>,
    /// Number of records matching the filter across all pages.
    pub total_count: u64,
    /// Links to neighbouring pages.
    pub links: PageLinks,
}

/// Handles scan result persistence and paged listing.
#[derive(Clone)]
pub struct ScanResultService {
    /// Scan result repository.
    repo: Arc<dyn Repository<ScanResult>>,
    /// Request parameter translator.
    translator: QueryTranslator,
    /// Pagination link builder.
    links: PageLinkBuilder,
}

impl std::fmt::Debug for ScanResultService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanResultService")
            .field("translator", &self.translator)
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

impl ScanResultService {
    /// Creates a new scan result service.
    ///
    /// `base_url` is the public origin prefixed to pagination links.
    pub fn new(
        repo: Arc<dyn Repository<ScanResult>>,
        query: &QueryConfig,
        base_url: &str,
    ) -> Result<Self, AppError> {
        Ok(Self {
            repo,
            translator: QueryTranslator::new(query),
            links: PageLinkBuilder::new(base_url, query)?,
        })
    }

    /// Stores a new scan result and returns it as stored.
    pub async fn create(&self, data: NewScanResult) -> Result<ScanResult, AppError> {
        let repository_name = data.repository_name.clone();
        info!(
            repository_name = %repository_name,
            status = %data.status,
            findings = data.findings.len(),
            "Create security scan result request received for repository name [{repository_name}]"
        );

        let record = ScanResult::from_new(data, ScanResultId::generate(), Utc::now());
        let stored = self.repo.insert(&record).await.map_err(|e| {
            error!(repository_name = %repository_name, error = %e, "Failed to store scan result");
            if e.kind == ErrorKind::Conflict {
                return e;
            }
            e.wrap(
                ErrorKind::Internal,
                format!(
                    "An error occurred while creating the security scan result record for repository name [{repository_name}]"
                ),
            )
        })?;

        info!(
            id = %stored.id,
            "Create security scan result request successfully completed for repository name [{repository_name}]"
        );
        Ok(stored)
    }

    /// Lists scan results matching the request's filter parameters.
    ///
    /// `route` is the request path and original query string; it is echoed
    /// into the page links with only the page parameters rewritten.
    pub async fn list(
        &self,
        params: &ParameterSet,
        page: PageRequest,
        route: &str,
    ) -> Result<ScanResultPage, AppError> {
        page.ensure_positive()?;

        let query = PagedQuery::new(
            self.translator.build_filter(params),
            self.translator.build_sort(params),
            page,
        );
        info!(
            filter = ?query.filter,
            sort = ?query.sort,
            page = page.page,
            items_per_page = page.items_per_page,
            "Security scan result get list request received by service"
        );

        let result = PagedQueryExecutor::execute(self.repo.as_ref(), &query)
            .await
            .map_err(|e| {
                e.wrap(
                    ErrorKind::Internal,
                    "An error occurred while retrieving security scan result list",
                )
            })?;

        let links = self
            .links
            .build(route, page.page, page.items_per_page, result.count)?;

        if result.is_empty_page() {
            debug!(
                total_count = result.count,
                "No record found for get security scan result list"
            );
        } else {
            info!(
                total_count = result.count,
                returned = result.list_data.len(),
                "Security scan result request successfully completed"
            );
        }

        Ok(ScanResultPage {
            items: result.list_data,
            total_count: result.count,
            links,
        })
    }

    /// Fetches one scan result by id.
    pub async fn get(&self, result_id: &str) -> Result<ScanResult, AppError> {
        info!("Get specific security scan result request received for id [{result_id}]");

        let id: ScanResultId = result_id.parse()?;
        let found = self.repo.find_by_id(id.as_str()).await.map_err(|e| {
            e.wrap(
                ErrorKind::Internal,
                format!("An error occurred while retrieving the security scan result for id [{result_id}]"),
            )
        })?;

        match found {
            Some(record) => {
                info!("Get security scan result request successfully completed for id [{result_id}]");
                Ok(record)
            }
            None => {
                let message = format!("No security scan result found for id [{result_id}]");
                debug!("{message}");
                Err(AppError::not_found(message))
            }
        }
    }
}
