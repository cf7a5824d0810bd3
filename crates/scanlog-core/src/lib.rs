//! # scanlog-core
//!
//! Core crate for ScanLog. Contains configuration schemas, the unified
//! error system, request-scoped query types, the query-parameter
//! translator, the pagination link builder and the paged query executor.
//!
//! This crate has **no** internal dependencies on other ScanLog crates.

pub mod config;
pub mod error;
pub mod query;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
