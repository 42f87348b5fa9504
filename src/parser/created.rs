//! `created` timestamp parsing for report actions.
//!
//! The messaging subsystem writes `"YYYY-MM-DD HH:MM:SS.fff"` in UTC;
//! RFC 3339 is accepted as well.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format used when writing timestamps back out.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Parse a `created` value. Returns `None` for anything unrecognized.
pub fn parse_created(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
    for fmt in &formats {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    None
}

/// Serde adapter: `#[serde(with = "crate::parser::created")]`.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(CREATED_FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized created timestamp '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_created_millis() {
        let dt = parse_created("2024-03-01 10:15:00.123").unwrap();
        assert_eq!(dt.format(CREATED_FORMAT).to_string(), "2024-03-01 10:15:00.123");
    }

    #[test]
    fn test_parse_created_without_fraction() {
        let dt = parse_created("2024-03-01 10:15:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 10:15");
    }

    #[test]
    fn test_parse_created_rfc3339_offset() {
        let dt = parse_created("2024-03-01T12:15:00+02:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:15");
    }

    #[test]
    fn test_parse_created_garbage() {
        assert!(parse_created("yesterday").is_none());
        assert!(parse_created("  ").is_none());
    }
}
