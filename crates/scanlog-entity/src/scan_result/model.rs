//! Security scan result entity model.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::finding::Finding;
use super::id::ScanResultId;
use super::status::ScanStatus;

/// Name of the collection holding scan results.
pub const COLLECTION: &str = "SecurityScanResult";

/// The result of scanning one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: ScanResultId,
    /// Name of the scanned repository.
    #[serde(rename = "RepositoryName")]
    pub repository_name: String,
    /// Current scan state.
    #[serde(rename = "Status")]
    pub status: ScanStatus,
    /// When the scan was queued.
    #[serde(rename = "QueuedAt", with = "crate::timestamp")]
    pub queued_at: DateTime<Utc>,
    /// When scanning started.
    #[serde(
        rename = "ScanningAt",
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub scanning_at: Option<DateTime<Utc>>,
    /// When scanning finished.
    #[serde(
        rename = "FinishedAt",
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub finished_at: Option<DateTime<Utc>>,
    /// Issues found by the scan.
    #[serde(rename = "Findings", default)]
    pub findings: Vec<Finding>,
    /// When the record was created.
    #[serde(rename = "createdAt", with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    #[serde(rename = "updatedAt", with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl ScanResult {
    /// Stored name of the repository name field.
    pub const REPOSITORY_NAME: &'static str = "RepositoryName";

    /// Stored name of the status field.
    pub const STATUS: &'static str = "Status";

    /// Field names a list request may filter on.
    pub const FILTERABLE_FIELDS: [&'static str; 2] = [Self::REPOSITORY_NAME, Self::STATUS];

    /// Field names a list request may sort on.
    pub const SORTABLE_FIELDS: [&'static str; 7] = [
        Self::REPOSITORY_NAME,
        Self::STATUS,
        "QueuedAt",
        "ScanningAt",
        "FinishedAt",
        "createdAt",
        "updatedAt",
    ];

    /// Build a new record from create data, stamping id and timestamps.
    ///
    /// `QueuedAt` defaults to `now` when the caller did not send one. All
    /// timestamps are truncated to the stored millisecond precision.
    pub fn from_new(data: NewScanResult, id: ScanResultId, now: DateTime<Utc>) -> Self {
        let now = now.trunc_subsecs(3);
        Self {
            id,
            repository_name: data.repository_name,
            status: data.status,
            queued_at: data.queued_at.map_or(now, |dt| dt.trunc_subsecs(3)),
            scanning_at: data.scanning_at.map(|dt| dt.trunc_subsecs(3)),
            finished_at: data.finished_at.map(|dt| dt.trunc_subsecs(3)),
            findings: data.findings,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of findings.
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }
}

/// Data required to create a new scan result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScanResult {
    /// Name of the scanned repository.
    #[serde(rename = "RepositoryName")]
    pub repository_name: String,
    /// Initial scan state.
    #[serde(rename = "Status")]
    pub status: ScanStatus,
    /// When the scan was queued.
    #[serde(rename = "QueuedAt", default, with = "crate::timestamp::option")]
    pub queued_at: Option<DateTime<Utc>>,
    /// When scanning started.
    #[serde(rename = "ScanningAt", default, with = "crate::timestamp::option")]
    pub scanning_at: Option<DateTime<Utc>>,
    /// When scanning finished.
    #[serde(rename = "FinishedAt", default, with = "crate::timestamp::option")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Issues found by the scan.
    #[serde(rename = "Findings", default)]
    pub findings: Vec<Finding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_result::finding::{FindingLocation, FindingMetadata, Position, Positions};

    fn new_result() -> NewScanResult {
        NewScanResult {
            repository_name: "once".to_string(),
            status: ScanStatus::Queued,
            queued_at: None,
            scanning_at: None,
            finished_at: None,
            findings: vec![Finding {
                kind: "sast".to_string(),
                rule_id: "G402".to_string(),
                location: FindingLocation {
                    path: "./someJavaScriptFile.js".to_string(),
                    positions: Some(Positions {
                        begin: Position { line: 62 },
                    }),
                },
                metadata: FindingMetadata {
                    description: None,
                    severity: "HIGH".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_from_new_defaults_queued_at() {
        let now = crate::timestamp::parse("2019-12-14T07:33:00.536Z").unwrap();
        let result = ScanResult::from_new(new_result(), ScanResultId::generate(), now);
        assert_eq!(result.queued_at, now);
        assert_eq!(result.created_at, now);
        assert_eq!(result.finding_count(), 1);
    }

    #[test]
    fn test_document_field_names() {
        let now = crate::timestamp::parse("2019-12-14T07:33:00.536Z").unwrap();
        let id: ScanResultId = "5df4a0f4c2b1e8a1b2c3d4e5".parse().unwrap();
        let json = serde_json::to_value(ScanResult::from_new(new_result(), id, now)).unwrap();

        assert_eq!(json["_id"], "5df4a0f4c2b1e8a1b2c3d4e5");
        assert_eq!(json["RepositoryName"], "once");
        assert_eq!(json["Status"], "Queued");
        assert_eq!(json["QueuedAt"], "2019-12-14T07:33:00.536Z");
        assert!(json.get("ScanningAt").is_none());
        assert_eq!(json["Findings"][0]["type"], "sast");
        assert_eq!(json["Findings"][0]["ruleId"], "G402");
        assert_eq!(json["Findings"][0]["location"]["positions"]["begin"]["line"], 62);
        assert_eq!(json["createdAt"], "2019-12-14T07:33:00.536Z");
    }

    #[test]
    fn test_new_scan_result_from_payload() {
        let data: NewScanResult = serde_json::from_value(serde_json::json!({
            "RepositoryName": "once",
            "Status": "In Progress",
            "QueuedAt": "2019-12-14T13:03:00.536+05:30"
        }))
        .unwrap();
        assert_eq!(data.status, ScanStatus::InProgress);
        assert!(data.findings.is_empty());
        assert_eq!(
            data.queued_at.map(|dt| crate::timestamp::format(&dt)),
            Some("2019-12-14T07:33:00.536Z".to_string())
        );
    }
}
