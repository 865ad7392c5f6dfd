//! Date formatting shared by the case table and the exporters.

use chrono::{DateTime, NaiveDate, Utc};

/// Format an ISO date or datetime string as "Jan 20, 2026".
///
/// Unparseable input is returned unchanged; empty input stays empty.
pub fn format_date_human(date_str: &str) -> String {
    let trimmed = date_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%b %-d, %Y").to_string();
    }
    trimmed
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

pub fn format_optional_date(date: Option<&str>) -> String {
    date.map(format_date_human).unwrap_or_default()
}

/// Today's date for report headers.
pub fn today_human(now: DateTime<Utc>) -> String {
    now.format("%b %-d, %Y").to_string()
}

/// RFC 3339 timestamp with millisecond precision, as the backend emits.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
