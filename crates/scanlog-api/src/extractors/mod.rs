//! Custom Axum extractors.

pub mod json;
pub mod list_query;

pub use json::ValidatedJson;
pub use list_query::{ListScanResultsQuery, ScanResultListRequest};
