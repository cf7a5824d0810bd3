//! Security scan result domain entities.

pub mod finding;
pub mod id;
pub mod model;
pub mod status;

pub use finding::{Finding, FindingLocation, FindingMetadata, Position, Positions};
pub use id::ScanResultId;
pub use model::{COLLECTION, NewScanResult, ScanResult};
pub use status::ScanStatus;
