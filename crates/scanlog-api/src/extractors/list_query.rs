//! Query-string extractor for the scan result list endpoint.

use axum::extract::{FromRequestParts, OriginalUri, Query};
use axum::http::Uri;
use axum::http::request::Parts;
use serde::Serialize;
use validator::{Validate, ValidationError};

use scanlog_core::config::QueryConfig;
use scanlog_core::error::AppError;
use scanlog_core::types::filter::FilterValue;
use scanlog_core::types::pagination::PageRequest;
use scanlog_core::types::params::ParameterSet;
use scanlog_entity::scan_result::{ScanResult, ScanStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// Declared list-query parameters after coercion.
///
/// Repeated `RepositoryName`/`Status` pairs and comma-separated `Status`
/// or `sortBy` values are collected into lists.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListScanResultsQuery {
    /// Page number.
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u64,
    /// Page size.
    #[validate(range(min = 1, message = "itemsPerPage must be at least 1"))]
    pub items_per_page: u64,
    /// Sort tokens, `-` prefix for descending.
    #[validate(custom(function = "validate_sort_tokens"))]
    pub sort_by: Vec<String>,
    /// Repository names to match.
    #[validate(custom(function = "validate_repository_names"))]
    pub repository_name: Vec<String>,
    /// Statuses to match.
    #[validate(custom(function = "validate_statuses"))]
    pub status: Vec<String>,
}

impl ListScanResultsQuery {
    /// Coerce raw query pairs using the configured parameter names.
    ///
    /// Undeclared parameters are ignored.
    pub fn from_pairs(pairs: &[(String, String)], config: &QueryConfig) -> Result<Self, ApiError> {
        let mut page = None;
        let mut items_per_page = None;
        let mut sort_by = Vec::new();
        let mut repository_name = Vec::new();
        let mut status = Vec::new();

        for (name, value) in pairs {
            if *name == config.page_param {
                page = Some(parse_positive(name, value)?);
            } else if *name == config.items_per_page_param {
                items_per_page = Some(parse_positive(name, value)?);
            } else if *name == config.sort_param {
                sort_by.extend(split_tokens(value));
            } else if name == ScanResult::REPOSITORY_NAME {
                repository_name.push(value.clone());
            } else if name == ScanResult::STATUS {
                status.extend(split_tokens(value));
            }
        }

        let query = Self {
            page: page.unwrap_or(1),
            items_per_page: items_per_page.unwrap_or(config.default_items_per_page),
            sort_by,
            repository_name,
            status,
        };
        query.validate()?;
        if query.items_per_page > config.max_items_per_page {
            return Err(AppError::validation(format!(
                "{} must not exceed {}",
                config.items_per_page_param, config.max_items_per_page
            ))
            .into());
        }
        // The store's skip is a signed 64-bit offset.
        let max_page = i64::MAX as u64 / query.items_per_page;
        if query.page > max_page {
            return Err(AppError::validation(format!(
                "{} must not exceed {max_page}",
                config.page_param
            ))
            .into());
        }
        Ok(query)
    }

    /// Requested page window.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.items_per_page)
    }

    /// Parameters in declaration order, as handed to the query translator.
    pub fn to_parameter_set(&self, config: &QueryConfig) -> ParameterSet {
        ParameterSet::new()
            .query(config.page_param.as_str(), self.page as i64)
            .query(
                config.items_per_page_param.as_str(),
                self.items_per_page as i64,
            )
            .query(config.sort_param.as_str(), self.sort_by.clone())
            .query(ScanResult::REPOSITORY_NAME, list_value(&self.repository_name))
            .query(ScanResult::STATUS, list_value(&self.status))
    }
}

/// Everything the list handler needs from the request.
#[derive(Debug, Clone)]
pub struct ScanResultListRequest {
    /// Coerced and validated parameters.
    pub query: ListScanResultsQuery,
    /// Parameters for the query translator.
    pub params: ParameterSet,
    /// Request path plus original query string.
    pub route: String,
}

impl FromRequestParts<AppState> for ScanResultListRequest {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;

        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());

        let config = &state.config.query;
        let query = ListScanResultsQuery::from_pairs(&pairs, config)?;
        let params = query.to_parameter_set(config);
        Ok(Self {
            query,
            params,
            route: route_of(&uri),
        })
    }
}

fn route_of(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn parse_positive(name: &str, value: &str) -> Result<u64, ApiError> {
    value.trim().parse::<u64>().map_err(|_| {
        AppError::validation(format!("{name} must be a positive integer, got '{value}'")).into()
    })
}

fn split_tokens(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// One value stays a scalar (equality); several become a list (membership).
fn list_value(values: &[String]) -> FilterValue {
    match values {
        [] => FilterValue::Null,
        [single] => FilterValue::String(single.clone()),
        many => FilterValue::StringList(many.to_vec()),
    }
}

fn validate_sort_tokens(tokens: &[String]) -> Result<(), ValidationError> {
    for token in tokens {
        let field = token.strip_prefix('-').unwrap_or(token);
        if !ScanResult::SORTABLE_FIELDS.contains(&field) {
            return Err(ValidationError::new("sort_field")
                .with_message(format!("Cannot sort by '{token}'").into()));
        }
    }
    Ok(())
}

fn validate_repository_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(ValidationError::new("blank")
            .with_message("RepositoryName must not be blank".into()));
    }
    Ok(())
}

fn validate_statuses(statuses: &[String]) -> Result<(), ValidationError> {
    for status in statuses {
        if status.parse::<ScanStatus>().is_err() {
            return Err(ValidationError::new("status")
                .with_message(format!("Unknown status '{status}'").into()));
        }
    }
    Ok(())
}
