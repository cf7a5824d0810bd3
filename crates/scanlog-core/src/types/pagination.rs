//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Requested page of a list query.
///
/// Both values are caller-supplied and are not clamped here; request
/// validation rejects non-positive values before they reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub items_per_page: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, items_per_page: u64) -> Self {
        Self {
            page,
            items_per_page,
        }
    }

    /// Fail unless both page and page size are at least 1.
    pub fn ensure_positive(&self) -> Result<(), AppError> {
        if self.page == 0 {
            return Err(AppError::validation("page must be at least 1"));
        }
        if self.items_per_page == 0 {
            return Err(AppError::validation("itemsPerPage must be at least 1"));
        }
        Ok(())
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.items_per_page)
    }

    /// Maximum number of records to return.
    pub fn limit(&self) -> u64 {
        self.items_per_page
    }
}

/// Total count and derived last page of a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Number of records matching the filter.
    pub total_count: u64,
    /// Last page number; at least 1 even when nothing matched.
    pub last_page: u64,
}

impl PageSummary {
    /// Derive the last page from a total count and page size.
    pub fn compute(total_count: u64, items_per_page: u64) -> Result<Self, AppError> {
        if items_per_page == 0 {
            return Err(AppError::validation("itemsPerPage must be at least 1"));
        }
        let last_page = total_count.div_ceil(items_per_page).max(1);
        Ok(Self {
            total_count,
            last_page,
        })
    }
}

/// One page of records plus the total count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Number of records matching the filter.
    pub count: u64,
    /// Records on the requested page.
    pub list_data: Vec<T>,
}

impl<T> PagedResult<T> {
    /// Create a new paged result.
    pub fn new(count: u64, list_data: Vec<T>) -> Self {
        Self { count, list_data }
    }

    /// Whether the requested page holds no records.
    pub fn is_empty_page(&self) -> bool {
        self.list_data.is_empty()
    }
}
