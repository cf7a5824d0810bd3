//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use scanlog_entity::scan_result::{
    Finding, FindingLocation, FindingMetadata, NewScanResult, Positions, ScanStatus,
};

/// Create scan result request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateScanResultRequest {
    /// Name of the scanned repository.
    #[serde(rename = "RepositoryName")]
    #[validate(
        length(min = 1, max = 512, message = "RepositoryName is required"),
        custom(function = "not_blank")
    )]
    pub repository_name: String,
    /// Scan state.
    #[serde(rename = "Status")]
    pub status: ScanStatus,
    /// When the scan was queued; defaults to the creation time.
    #[serde(
        rename = "QueuedAt",
        default,
        with = "scanlog_entity::timestamp::option"
    )]
    pub queued_at: Option<DateTime<Utc>>,
    /// When scanning started.
    #[serde(
        rename = "ScanningAt",
        default,
        with = "scanlog_entity::timestamp::option"
    )]
    pub scanning_at: Option<DateTime<Utc>>,
    /// When scanning finished.
    #[serde(
        rename = "FinishedAt",
        default,
        with = "scanlog_entity::timestamp::option"
    )]
    pub finished_at: Option<DateTime<Utc>>,
    /// Issues found by the scan.
    #[serde(rename = "Findings", default)]
    #[validate(nested)]
    pub findings: Vec<FindingRequest>,
}

/// One finding in a create request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindingRequest {
    /// Finding category.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub kind: String,
    /// Identifier of the rule that fired.
    #[validate(length(min = 1, message = "ruleId is required"))]
    pub rule_id: String,
    /// Where the issue was found.
    #[validate(nested)]
    pub location: FindingLocationRequest,
    /// Severity and description.
    #[validate(nested)]
    pub metadata: FindingMetadataRequest,
}

/// Location of a finding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindingLocationRequest {
    /// File path.
    #[validate(length(min = 1, message = "location.path is required"))]
    pub path: String,
    /// Position within the file.
    #[serde(default)]
    pub positions: Option<Positions>,
}

/// Metadata of a finding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindingMetadataRequest {
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Severity label.
    #[validate(length(min = 1, message = "metadata.severity is required"))]
    pub severity: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

impl From<FindingRequest> for Finding {
    fn from(req: FindingRequest) -> Self {
        Self {
            kind: req.kind,
            rule_id: req.rule_id,
            location: FindingLocation {
                path: req.location.path,
                positions: req.location.positions,
            },
            metadata: FindingMetadata {
                description: req.metadata.description,
                severity: req.metadata.severity,
            },
        }
    }
}

impl From<CreateScanResultRequest> for NewScanResult {
    fn from(req: CreateScanResultRequest) -> Self {
        Self {
            repository_name: req.repository_name,
            status: req.status,
            queued_at: req.queued_at,
            scanning_at: req.scanning_at,
            finished_at: req.finished_at,
            findings: req.findings.into_iter().map(Finding::from).collect(),
        }
    }
}
