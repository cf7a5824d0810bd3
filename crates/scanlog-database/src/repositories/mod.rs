//! Repository implementations for ScanLog entities.

pub mod document;
pub mod memory;
pub mod query;
pub mod scan_result;

pub use document::ScanResultDocument;
pub use memory::MemoryRepository;
pub use scan_result::ScanResultRepository;
