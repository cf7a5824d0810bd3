//! List-query parameter naming and page-size limits.

use serde::{Deserialize, Serialize};

/// Names of the reserved list-query parameters and page-size bounds.
///
/// Reserved parameters steer sorting and pagination and never become
/// filter constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Name of the sort parameter.
    #[serde(default = "default_sort_param")]
    pub sort_param: String,
    /// Name of the page-number parameter.
    #[serde(default = "default_page_param")]
    pub page_param: String,
    /// Name of the page-size parameter.
    #[serde(default = "default_items_per_page_param")]
    pub items_per_page_param: String,
    /// Additional parameter names excluded from filters.
    #[serde(default)]
    pub extra_reserved: Vec<String>,
    /// Page size used when the request does not carry one.
    #[serde(default = "default_items_per_page")]
    pub default_items_per_page: u64,
    /// Largest page size a request may ask for.
    #[serde(default = "default_max_items_per_page")]
    pub max_items_per_page: u64,
}

impl QueryConfig {
    /// All parameter names that are excluded from filters.
    pub fn reserved_names(&self) -> Vec<String> {
        let mut names = vec![
            self.sort_param.clone(),
            self.page_param.clone(),
            self.items_per_page_param.clone(),
        ];
        for name in &self.extra_reserved {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            sort_param: default_sort_param(),
            page_param: default_page_param(),
            items_per_page_param: default_items_per_page_param(),
            extra_reserved: Vec::new(),
            default_items_per_page: default_items_per_page(),
            max_items_per_page: default_max_items_per_page(),
        }
    }
}

fn default_sort_param() -> String {
    "sortBy".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_items_per_page_param() -> String {
    "itemsPerPage".to_string()
}

fn default_items_per_page() -> u64 {
    20
}

fn default_max_items_per_page() -> u64 {
    100
}
