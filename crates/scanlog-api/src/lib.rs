//! # scanlog-api
//!
//! HTTP API layer for ScanLog built on Axum.
//!
//! Provides the scan result and status endpoints, middleware (request id,
//! tracing, request logging, CORS, compression, timeout), extractors, DTOs
//! and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
