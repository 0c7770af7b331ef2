//! Severity taxonomy for log entries.
//!
//! A closed enum with case-insensitive token mapping. Unrecognized tokens
//! map to `Unknown` rather than failing; level variability across handlers
//! is expected, not an error.

use serde::{Deserialize, Serialize};

/// Severity of a single log entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    /// Line carried no recognizable level token.
    Unknown,
}

impl LogLevel {
    /// All levels in display order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Unknown,
    ];

    /// Human-readable label for the level.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }

    /// Badge color used by the presentation layer. A fixed, closed table:
    /// styling is never inferred at runtime.
    #[must_use]
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::Debug => "gray",
            Self::Info => "green",
            Self::Warning => "yellow",
            Self::Error => "red",
            Self::Critical => "magenta",
            Self::Unknown => "default",
        }
    }

    /// Map a raw level token to a level, case-insensitively.
    ///
    /// `WARN`/`WARNING` and `FATAL`/`CRITICAL` aliases are accepted.
    /// Anything else maps to `Unknown`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warning,
            "error" => Self::Error,
            "critical" | "fatal" => Self::Critical,
            _ => Self::Unknown,
        }
    }
}
