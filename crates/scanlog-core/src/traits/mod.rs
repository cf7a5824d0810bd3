//! Core traits defined in `scanlog-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
