//! Findings reported by a scan.

use serde::{Deserialize, Serialize};

/// A single issue found in the scanned repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Finding category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier of the rule that fired.
    pub rule_id: String,
    /// Where the issue was found.
    pub location: FindingLocation,
    /// Severity and description.
    pub metadata: FindingMetadata,
}

/// File and position of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingLocation {
    /// Path of the file, relative to the repository root.
    pub path: String,
    /// Position within the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Positions>,
}

/// Span of a finding within a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    /// Start of the span.
    pub begin: Position,
}

/// A position in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
}

/// Descriptive data attached to a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingMetadata {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Severity label, e.g. `HIGH`.
    pub severity: String,
}

impl Finding {
    /// Line the finding starts on, if known.
    pub fn line(&self) -> Option<u32> {
        self.location.positions.as_ref().map(|p| p.begin.line)
    }
}
