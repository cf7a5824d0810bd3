//! Navigation links returned with paged list responses.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `first`/`last` links plus `prev`/`next` when they exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Link to page 1.
    pub first: String,
    /// Link to the last page.
    pub last: String,
    /// Link to the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Link to the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageLinks {
    /// Serialize to the JSON string sent in the page-links header.
    pub fn to_header_value(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}
