//! Timestamp normalization and timezone display rendering.
//!
//! Instants are stored as UTC regardless of how the log line spelled them;
//! the display zone is purely a rendering parameter. Ordering decisions
//! elsewhere in the engine always use the stored instant, never the
//! zone-shifted wall-clock string.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Display format for zone-rendered timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %Z";

/// Offset-less ISO-8601 shapes accepted as UTC fallbacks when the RFC 3339
/// parse fails.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// The requested display zone is not a known IANA name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timezone: {0}")]
pub struct UnknownZone(pub String);

/// Parse a raw timestamp string into a UTC instant.
///
/// Accepts RFC 3339 with or without fractional seconds and an explicit
/// offset or `Z`; offset-less ISO-8601 is treated as UTC. Returns `None`
/// for anything else; an unparseable timestamp never aborts a parse.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    None
}

/// Whether a string is shaped like a timestamp (leading `YYYY-MM-DD` date
/// followed by `T` or a space). Used as the gate for starting a new entry;
/// stricter parsing happens in [`parse_instant`].
#[must_use]
pub fn looks_like_timestamp(raw: &str) -> bool {
    let bytes = raw.trim_start().as_bytes();
    if bytes.len() < 11 {
        return false;
    }
    bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4] == b'-'
        && bytes[5].is_ascii_digit()
        && bytes[6].is_ascii_digit()
        && bytes[7] == b'-'
        && bytes[8].is_ascii_digit()
        && bytes[9].is_ascii_digit()
        && (bytes[10] == b'T' || bytes[10] == b' ')
}

/// Resolve an IANA zone name (e.g. `Europe/Oslo`) for display rendering.
pub fn resolve_zone(name: &str) -> Result<Tz, UnknownZone> {
    name.parse::<Tz>()
        .map_err(|_| UnknownZone(name.to_owned()))
}

/// Render a stored UTC instant in the given display zone.
#[must_use]
pub fn render_in_zone(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format(DISPLAY_FORMAT).to_string()
}
