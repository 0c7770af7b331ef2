//! Single-line classifier for the accepted log head shape.
//!
//! Accepted head (format v1, delimiters are part of the contract):
//!
//! ```text
//! [<ISO-8601 timestamp>] {<source>} <LEVEL> - <message>
//! ```
//!
//! `{<source>}` and `<LEVEL> - ` are both optional. The bracketed prefix
//! must be date-shaped (`YYYY-MM-DD` head) to start a new entry; any other
//! line is a continuation of the entry currently being built. This keeps
//! bracket markers inside tracebacks and formatted exceptions from
//! splitting an entry apart.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::level::LogLevel;
use crate::timestamp::{looks_like_timestamp, parse_instant};

/// Head pattern, format v1. Captures: 1 = bracket content, 2 = source tag,
/// 3 = level token, 4 = message rest.
const HEAD_PATTERN: &str =
    r"^\[([^\]]*)\]\s*(?:\{([^}]*)\}\s*)?(?:([A-Za-z]+)\s+-\s+)?(.*)$";

fn head_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEAD_PATTERN).ok()).as_ref()
}

/// A recognized entry head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHead {
    /// Parsed instant; `None` when the prefix was date-shaped but did not
    /// parse (the entry is still produced, the parse emits a warning).
    pub timestamp: Option<DateTime<Utc>>,
    /// Per-line `{source}` tag, when present.
    pub source: Option<String>,
    /// Level token, when present; unrecognized tokens map to `Unknown`.
    pub level: Option<LogLevel>,
    /// Message text after the head.
    pub rest: String,
}

/// Classification of one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// The line starts a new entry.
    Head(LineHead),
    /// The line extends the previous entry's message.
    Continuation(String),
}

/// Classify a single raw line. Never fails: worst case the whole line is a
/// continuation.
#[must_use]
pub fn classify_line(raw: &str) -> LineClass {
    let Some(re) = head_regex() else {
        return LineClass::Continuation(raw.to_owned());
    };
    let Some(caps) = re.captures(raw) else {
        return LineClass::Continuation(raw.to_owned());
    };

    let bracket = caps.get(1).map_or("", |m| m.as_str());
    if !looks_like_timestamp(bracket) {
        return LineClass::Continuation(raw.to_owned());
    }

    let source = caps
        .get(2)
        .map(|m| m.as_str().trim().to_owned())
        .filter(|s| !s.is_empty());
    let level = caps.get(3).map(|m| LogLevel::from_token(m.as_str()));
    let rest = caps.get(4).map_or("", |m| m.as_str()).to_owned();

    LineClass::Head(LineHead {
        timestamp: parse_instant(bracket),
        source,
        level,
        rest,
    })
}
