//! HTTP request handlers.

pub mod scan_result;
pub mod status;
