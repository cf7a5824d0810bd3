//! Request data transfer objects.

pub mod request;

pub use request::{
    CreateScanResultRequest, FindingLocationRequest, FindingMetadataRequest, FindingRequest,
};
