//! Scan result identifiers.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use scanlog_core::AppError;

/// Identifier of a stored scan result: 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResultId(String);

impl ScanResultId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return its string form.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ScanResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScanResultId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(|oid| Self(oid.to_hex()))
            .map_err(|_| {
                AppError::validation(format!(
                    "Invalid security scan result id [{s}]: expected 24 hexadecimal characters"
                ))
            })
    }
}

impl AsRef<str> for ScanResultId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
