//! Timestamps as the service speaks them.
//!
//! The backend emits departure times either as RFC 3339 or as a bare local
//! date-time (`2025-01-20T19:30:00`) in Korea Standard Time. Bare values are
//! interpreted in [`service_offset`]. Outgoing values use the bare form.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

use crate::{Error, Result};

/// KST, UTC+09:00
pub const SERVICE_UTC_OFFSET_SECS: i32 = 9 * 3600;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn service_offset() -> FixedOffset {
    FixedOffset::east_opt(SERVICE_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub fn parse_service_time(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive
                .and_local_timezone(service_offset())
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| Error::InvalidTimestamp(raw.to_string()));
        }
    }

    Err(Error::InvalidTimestamp(raw.to_string()))
}

pub fn format_service_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&service_offset())
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// `#[serde(with = "taxipot_types::time::service_time")]`
pub mod service_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_service_time(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_service_time(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_is_taken_as_is() {
        let parsed = parse_service_time("2025-01-20T10:30:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_bare_local_time_is_kst() {
        let parsed = parse_service_time("2025-01-20T19:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap());

        let minutes_only = parse_service_time("2025-01-20T19:30").unwrap();
        assert_eq!(minutes_only, parsed);

        let fractional = parse_service_time("2025-01-20T19:30:00.250").unwrap();
        assert_eq!(fractional.timestamp(), parsed.timestamp());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(
            parse_service_time("tomorrow"),
            Err(Error::InvalidTimestamp("tomorrow".to_string()))
        );
    }

    #[test]
    fn test_format_uses_service_offset() {
        let time = Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap();
        assert_eq!(format_service_time(&time), "2025-01-20T19:30:00");
    }
}
