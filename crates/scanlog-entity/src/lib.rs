//! # scanlog-entity
//!
//! Domain entity models for ScanLog. Every struct in this crate represents
//! a stored document or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize`; stored documents serialize with
//! the same field names in the database and on the wire.

pub mod scan_result;
pub mod timestamp;

pub use scan_result::{
    Finding, FindingLocation, FindingMetadata, NewScanResult, Position, Positions, ScanResult,
    ScanResultId, ScanStatus,
};
