//! # scanlog-service
//!
//! Business logic service layer for ScanLog. Each service orchestrates a
//! repository together with the query translator, the paged query
//! executor and the pagination link builder to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod scan_result;
pub mod status;

pub use scan_result::{ScanResultPage, ScanResultService};
pub use status::{HealthReport, StatusService, SystemStatus};
