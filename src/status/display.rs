//! Rendering helpers for resolved statuses.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Layout of a rendered status time, e.g. `2013-09-01 05:10AM`.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %I:%M%p";

/// Tried in order after RFC 3339 fails.
const FALLBACK_OFFSET_FORMATS: [&str; 1] = ["%Y-%m-%d %H:%M:%S %z"];
const FALLBACK_NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from normalizing a textual timestamp.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("Unparseable timestamp: {0:?}")]
    Unparseable(String),
}

/// Render a status time in the given offset.
pub fn format_status_time(time: DateTime<Utc>, offset: FixedOffset) -> String {
    time.with_timezone(&offset)
        .format(DISPLAY_TIME_FORMAT)
        .to_string()
}

/// Normalize a textual timestamp to UTC.
///
/// RFC 3339 is tried first. If that fails, a few looser layouts are tried;
/// naive layouts are taken as UTC.
pub fn parse_timestamp_text(text: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    tracing::warn!(timestamp = trimmed, "timestamp is not RFC 3339, trying fallback layouts");

    for layout in FALLBACK_OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, layout) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }
    for layout in FALLBACK_NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(trimmed, FALLBACK_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| TimeFormatError::Unparseable(text.to_string()))
}

/// Normalize a textual timestamp and render it like a status time.
///
/// # Example
///
/// ```rust
/// use milestone::status::format_timestamp_text;
/// use chrono::FixedOffset;
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// assert_eq!(
///     format_timestamp_text("2013-09-01T12:10:56Z", utc).unwrap(),
///     "2013-09-01 12:10PM"
/// );
/// assert_eq!(
///     format_timestamp_text("2013-09-01 00:10:56", utc).unwrap(),
///     "2013-09-01 12:10AM"
/// );
/// assert!(format_timestamp_text("last tuesday", utc).is_err());
/// ```
pub fn format_timestamp_text(text: &str, offset: FixedOffset) -> Result<String, TimeFormatError> {
    parse_timestamp_text(text).map(|time| format_status_time(time, offset))
}

fn trailing_parenthetical() -> &'static Regex {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    TRAILING.get_or_init(|| Regex::new(r"\s*\(.*\)\s*$").expect("trailing parenthetical pattern is valid"))
}

/// Strip a trailing parenthetical and surrounding whitespace.
///
/// # Example
///
/// ```rust
/// use milestone::status::simplify_display_text;
///
/// assert_eq!(simplify_display_text("Accessioned (indexed, ingested)"), "Accessioned");
/// assert_eq!(simplify_display_text("Opened"), "Opened");
/// ```
pub fn simplify_display_text(text: &str) -> String {
    trailing_parenthetical().replace(text, "").trim().to_string()
}
