//! Fixed-width RFC 3339 timestamps.
//!
//! Timestamps are returned as UTC strings with millisecond precision
//! (`2019-12-14T07:33:00.536Z`), so string order matches chronological
//! order. Any RFC 3339 offset is accepted on input. MongoDB keeps them as
//! BSON dates instead (see `scanlog-database`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render a timestamp in the wire format.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp and normalize it to UTC.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// Serialize a timestamp in the wire format.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Deserialize an RFC 3339 timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same format for optional timestamps.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional timestamp.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp; `null` and absence are `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let dt = parse("2019-12-14T13:03:00.536+05:30").unwrap();
        assert_eq!(format(&dt), "2019-12-14T07:33:00.536Z");
    }

    #[test]
    fn test_whole_seconds_keep_fixed_width() {
        let dt = parse("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(format(&dt), "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_rejects_non_rfc3339() {
        assert!(parse("14/12/2019").is_err());
    }
}
