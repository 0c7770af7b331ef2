//! Raw-bundle parser: classified lines in, structured entries out.
//!
//! Input order is preserved exactly as given, including across sources.
//! Clock skew between sources makes timestamp-sorting unsafe, so the
//! parser never reorders.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::{classify_line, LineClass};
use crate::level::LogLevel;

/// Source label assigned when neither the line nor its segment carries one.
pub const UNKNOWN_SOURCE: &str = "<unknown>";

/// Default ceiling on the number of lines consumed from a bundle.
pub const DEFAULT_MAX_LINES: usize = 100_000;

/// Default ceiling on a single line's byte length.
pub const DEFAULT_MAX_LINE_BYTES: usize = 16_384;

/// One labeled chunk of raw log text. Per-line `{source}` tags override the
/// segment label; the label covers untagged lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLogSegment {
    pub source: Option<String>,
    pub text: String,
}

/// The raw log input for one task attempt: either a single blob or several
/// per-source segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLogBundle {
    pub segments: Vec<RawLogSegment>,
}

impl RawLogBundle {
    /// Bundle over a single unlabeled blob of text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            segments: vec![RawLogSegment {
                source: None,
                text: text.into(),
            }],
        }
    }

    /// Bundle over labeled per-source segments.
    #[must_use]
    pub fn from_segments(segments: Vec<RawLogSegment>) -> Self {
        Self { segments }
    }

    /// Whether the bundle carries no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }
}

/// Parser limits. Exceeding either produces a warning naming the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of lines consumed; the rest are dropped.
    pub max_lines: usize,
    /// Maximum byte length of one line; longer lines are cut.
    pub max_line_bytes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// One structured log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// UTC instant; `None` only when the head carried an unparseable or
    /// absent timestamp.
    pub timestamp: Option<DateTime<Utc>>,
    pub level: LogLevel,
    pub source: String,
    /// Message lines, always at least one. Continuations append here in
    /// original order.
    pub message: Vec<String>,
    /// Set by the group folder when the entry belongs to a fold group.
    pub group_id: Option<String>,
}

impl LogEntry {
    /// First line of the message.
    #[must_use]
    pub fn first_line(&self) -> &str {
        self.message.first().map_or("", String::as_str)
    }
}

/// Output of one parse pass. Produced fresh on every call, never mutated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub entries: Vec<LogEntry>,
    /// Distinct source labels in first-seen order; feeds the source filter
    /// options.
    pub sources: Vec<String>,
    /// Non-fatal parse warning, each fragment naming its condition.
    pub warning: Option<String>,
}

/// Parse a raw bundle into structured entries.
///
/// Pure: identical input and options always produce an identical result.
/// Never fails; malformed input degrades into continuations, null
/// timestamps, and a warning.
#[must_use]
pub fn parse(bundle: &RawLogBundle, options: &ParseOptions) -> ParseResult {
    let mut entries: Vec<LogEntry> = Vec::new();
    let mut sources: Vec<String> = Vec::new();
    let mut consumed = 0usize;
    let mut saw_timestamp = false;
    let mut saw_bad_timestamp = false;
    let mut cut_long_line = false;
    let mut dropped_lines = false;

    'segments: for segment in &bundle.segments {
        if segment.text.is_empty() {
            continue;
        }
        for raw_line in segment.text.lines() {
            if consumed >= options.max_lines {
                dropped_lines = true;
                break 'segments;
            }
            consumed += 1;

            let line = if raw_line.len() > options.max_line_bytes {
                cut_long_line = true;
                cut_to_boundary(raw_line, options.max_line_bytes)
            } else {
                raw_line
            };

            match classify_line(line) {
                LineClass::Head(head) => {
                    if head.timestamp.is_some() {
                        saw_timestamp = true;
                    } else {
                        saw_bad_timestamp = true;
                    }
                    let source = head
                        .source
                        .or_else(|| segment.source.clone())
                        .unwrap_or_else(|| UNKNOWN_SOURCE.to_owned());
                    record_source(&mut sources, &source);
                    entries.push(LogEntry {
                        timestamp: head.timestamp,
                        level: head.level.unwrap_or(LogLevel::Unknown),
                        source,
                        message: vec![head.rest],
                        group_id: None,
                    });
                }
                LineClass::Continuation(text) => match entries.last_mut() {
                    Some(entry) => entry.message.push(text),
                    None => {
                        let source = segment
                            .source
                            .clone()
                            .unwrap_or_else(|| UNKNOWN_SOURCE.to_owned());
                        record_source(&mut sources, &source);
                        entries.push(LogEntry {
                            timestamp: None,
                            level: LogLevel::Unknown,
                            source,
                            message: vec![text],
                            group_id: None,
                        });
                    }
                },
            }
        }
    }

    let mut warnings: Vec<String> = Vec::new();
    if !entries.is_empty() && !saw_timestamp {
        warnings.push(
            "no timestamps recognized in log output; the log format may be unsupported"
                .to_owned(),
        );
    } else if saw_bad_timestamp {
        warnings.push("one or more log timestamps could not be parsed".to_owned());
    }
    if dropped_lines {
        warnings.push(format!(
            "log output exceeded {} lines; remaining lines were dropped",
            options.max_lines
        ));
    }
    if cut_long_line {
        warnings.push(format!(
            "a log line exceeded {} bytes and was truncated",
            options.max_line_bytes
        ));
    }

    ParseResult {
        entries,
        sources,
        warning: if warnings.is_empty() {
            None
        } else {
            Some(warnings.join("; "))
        },
    }
}

fn record_source(sources: &mut Vec<String>, source: &str) {
    if !sources.iter().any(|s| s == source) {
        sources.push(source.to_owned());
    }
}

/// Cut a line to at most `max` bytes, backing off to a char boundary.
fn cut_to_boundary(line: &str, max: usize) -> &str {
    let mut end = max;
    while end > 0 && !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
