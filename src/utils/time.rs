//! Time utilities: timestamp encoding for the DB, readable durations.

use chrono::{DateTime, SecondsFormat, Utc};

/// Canonical DB/export encoding: RFC 3339, millisecond precision, `Z` suffix.
pub fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Local wall-clock rendering for terminal output.
pub fn display_ts(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn format_optional_ts(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(t) => display_ts(t),
        None => "--".to_string(),
    }
}
