//! System status and health reporting.

pub mod service;

pub use service::{HealthReport, StatusService, SystemStatus};
