//! # scanlog-database
//!
//! MongoDB connection management, collection migrations and the concrete
//! repository implementations for ScanLog entities, plus an in-memory
//! store used for development and tests.

pub mod connection;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::MongoConnection;
pub use provider::{Store, StoreProvider};
