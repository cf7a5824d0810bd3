//! Scan status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a security scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanStatus {
    /// Waiting for a scanner.
    Queued,
    /// A scanner is working on the repository.
    #[serde(rename = "In Progress")]
    InProgress,
    /// The scan finished.
    Success,
    /// The scan aborted.
    Failure,
}

impl ScanStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ScanStatus; 4] = [
        Self::Queued,
        Self::InProgress,
        Self::Success,
        Self::Failure,
    ];

    /// Return the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::InProgress => "In Progress",
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }

    /// Whether the scan has stopped running.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScanStatus {
    type Err = scanlog_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                scanlog_core::AppError::validation(format!(
                    "Invalid scan status: '{s}'. Expected one of: Queued, In Progress, Success, Failure"
                ))
            })
    }
}
