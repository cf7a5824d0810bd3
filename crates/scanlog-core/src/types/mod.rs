//! Request-scoped type definitions used across the ScanLog workspace.

pub mod filter;
pub mod links;
pub mod pagination;
pub mod params;
pub mod sorting;

pub use filter::{Filter, FilterValue};
pub use links::PageLinks;
pub use pagination::{PageRequest, PageSummary, PagedResult};
pub use params::{ParamLocation, ParameterSet, RequestParam};
pub use sorting::{SortDirection, SortField, SortSpec};
