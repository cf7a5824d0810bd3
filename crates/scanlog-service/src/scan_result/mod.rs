//! Security scan result use cases.

pub mod service;

pub use service::{ScanResultPage, ScanResultService};
