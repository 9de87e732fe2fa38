//! Timestamp handling for journey data.
//!
//! The journey API provides times as ISO 8601 strings with an explicit zone,
//! either a numeric offset (`+01:00`) or the UTC marker `Z`. Local wall-clock
//! offsets are kept so that displayed times match the station boards.

use chrono::{DateTime, FixedOffset};

/// A point in time with the offset it was reported in.
pub type Timestamp = DateTime<FixedOffset>;

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse an ISO 8601 timestamp with an explicit zone.
///
/// A trailing `Z` is normalized to `+00:00` before parsing. Timestamps
/// without any zone information are rejected.
///
/// # Examples
///
/// ```
/// use transit_board::domain::parse_timestamp;
///
/// let t = parse_timestamp("2024-03-15T08:00:00+01:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-03-15T08:00:00+01:00");
///
/// let utc = parse_timestamp("2024-03-15T07:00:00Z").unwrap();
/// assert_eq!(utc, t);
///
/// assert!(parse_timestamp("").is_err());
/// assert!(parse_timestamp("2024-03-15T08:00:00").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<Timestamp, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::new("empty timestamp"));
    }

    let normalized = match s.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+00:00"),
        None => s.to_string(),
    };

    DateTime::parse_from_rfc3339(&normalized)
        .map_err(|_| TimeError::new("expected RFC 3339 date-time with zone"))
}

/// Format a timestamp as a 24-hour "HH:MM" clock, or "?" when unknown.
pub fn format_clock(t: Option<&Timestamp>) -> String {
    match t {
        Some(t) => t.format("%H:%M").to_string(),
        None => "?".to_string(),
    }
}
