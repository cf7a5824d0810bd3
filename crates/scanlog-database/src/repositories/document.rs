//! Stored shape of a scan result.
//!
//! Field names match the API model; timestamps are BSON dates so the
//! collection stays queryable by date from any MongoDB client.

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use scanlog_core::error::AppError;
use scanlog_entity::scan_result::{Finding, ScanResult, ScanResultId, ScanStatus};

/// A `SecurityScanResult` document as MongoDB holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResultDocument {
    #[serde(rename = "_id")]
    pub id: ScanResultId,
    #[serde(rename = "RepositoryName")]
    pub repository_name: String,
    #[serde(rename = "Status")]
    pub status: ScanStatus,
    #[serde(rename = "QueuedAt")]
    pub queued_at: bson::DateTime,
    #[serde(
        rename = "ScanningAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scanning_at: Option<bson::DateTime>,
    #[serde(
        rename = "FinishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub finished_at: Option<bson::DateTime>,
    #[serde(rename = "Findings", default)]
    pub findings: Vec<Finding>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

impl From<&ScanResult> for ScanResultDocument {
    fn from(result: &ScanResult) -> Self {
        Self {
            id: result.id.clone(),
            repository_name: result.repository_name.clone(),
            status: result.status,
            queued_at: to_bson(&result.queued_at),
            scanning_at: result.scanning_at.as_ref().map(to_bson),
            finished_at: result.finished_at.as_ref().map(to_bson),
            findings: result.findings.clone(),
            created_at: to_bson(&result.created_at),
            updated_at: to_bson(&result.updated_at),
        }
    }
}

impl TryFrom<ScanResultDocument> for ScanResult {
    type Error = AppError;

    fn try_from(doc: ScanResultDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            queued_at: from_bson(doc.queued_at)?,
            scanning_at: doc.scanning_at.map(from_bson).transpose()?,
            finished_at: doc.finished_at.map(from_bson).transpose()?,
            created_at: from_bson(doc.created_at)?,
            updated_at: from_bson(doc.updated_at)?,
            id: doc.id,
            repository_name: doc.repository_name,
            status: doc.status,
            findings: doc.findings,
        })
    }
}

fn to_bson(value: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson(value: bson::DateTime) -> Result<DateTime<Utc>, AppError> {
    let millis = value.timestamp_millis();
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::database(format!("Stored date {millis}ms is out of range")))
}
