//! Store datetime encoding
//!
//! Timestamps are persisted as `YYYY-MM-DDTHH:MM:SS` in UTC, seconds
//! precision, no timezone suffix. The same encoding doubles as the
//! `GameHistory` map key, so lexicographic key order is chronological.

use chrono::NaiveDateTime;

/// Formats a timestamp in the store encoding.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Serde adapter for timestamp fields in node structs.
pub mod iso_seconds {
    use chrono::NaiveDateTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_datetime(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::schema::parse_datetime(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid datetime '{}'", raw)))
    }
}
