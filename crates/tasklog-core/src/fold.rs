//! Group folder: collapses related runs of entries into foldable groups.
//!
//! A maximal run of consecutive entries sharing (source, level) is folded
//! when every entry is a single line and the run reaches the repeat
//! threshold, or when the run opens a recognized multi-line block (a
//! traceback/stack-frame header). Group ids are deterministic over
//! (source, level, first timestamp, run length), so a user's
//! expand/collapse choice survives refilters of unchanged input.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::level::LogLevel;
use crate::parse::LogEntry;

/// Default number of same-shaped consecutive entries before a run folds.
pub const DEFAULT_REPEAT_THRESHOLD: usize = 3;

const SUMMARY_EXCERPT_BYTES: usize = 60;

/// Folding knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldOptions {
    /// Minimum run length for the repeated single-line rule. Runs of at
    /// least 2 entries opening a recognized block fold regardless.
    pub repeat_threshold: usize,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            repeat_threshold: DEFAULT_REPEAT_THRESHOLD,
        }
    }
}

/// A collapsible group of at least two consecutive entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogGroup {
    /// Deterministic id, stable across re-parses of unchanged input.
    pub id: String,
    pub entries: Vec<LogEntry>,
    /// Summary row text shown while collapsed.
    pub collapsed_summary: String,
    /// Whether the caller currently has this group expanded.
    pub expanded: bool,
}

impl LogGroup {
    /// Rows this group occupies when rendered: 1 collapsed, all entries
    /// expanded.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        if self.expanded {
            self.entries.len()
        } else {
            1
        }
    }
}

/// One position in the folded sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FoldedItem {
    Entry(LogEntry),
    Group(LogGroup),
}

/// Fold entries into groups, preserving overall order. A group occupies the
/// position of its first constituent entry. Groups named in `unfolded` are
/// still computed (id stability) but marked expanded.
#[must_use]
pub fn fold(
    entries: Vec<LogEntry>,
    unfolded: &HashSet<String>,
    options: &FoldOptions,
) -> Vec<FoldedItem> {
    let mut items = Vec::new();
    let mut run: Vec<LogEntry> = Vec::new();

    for entry in entries {
        let same_run = run
            .last()
            .is_some_and(|prev| prev.source == entry.source && prev.level == entry.level);
        if !same_run {
            flush_run(&mut items, std::mem::take(&mut run), unfolded, options);
        }
        run.push(entry);
    }
    flush_run(&mut items, run, unfolded, options);

    items
}

fn flush_run(
    items: &mut Vec<FoldedItem>,
    run: Vec<LogEntry>,
    unfolded: &HashSet<String>,
    options: &FoldOptions,
) {
    if run.is_empty() {
        return;
    }
    if !run_is_foldable(&run, options) {
        items.extend(run.into_iter().map(FoldedItem::Entry));
        return;
    }

    let first = &run[0];
    let id = group_id(&first.source, first.level, first, run.len());
    let collapsed_summary = make_summary(first, run.len());
    let expanded = unfolded.contains(&id);
    let entries: Vec<LogEntry> = run
        .into_iter()
        .map(|mut entry| {
            entry.group_id = Some(id.clone());
            entry
        })
        .collect();

    items.push(FoldedItem::Group(LogGroup {
        id,
        entries,
        collapsed_summary,
        expanded,
    }));
}

fn run_is_foldable(run: &[LogEntry], options: &FoldOptions) -> bool {
    if run.len() < 2 {
        return false;
    }
    if is_trace_header(run[0].first_line()) {
        return true;
    }
    let threshold = options.repeat_threshold.max(2);
    run.len() >= threshold && run.iter().all(|entry| entry.message.len() == 1)
}

fn group_id(source: &str, level: LogLevel, first: &LogEntry, len: usize) -> String {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    level.label().hash(&mut hasher);
    first
        .timestamp
        .map(|instant| instant.timestamp_micros())
        .hash(&mut hasher);
    len.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn make_summary(first: &LogEntry, count: usize) -> String {
    let excerpt = cut_excerpt(first.first_line().trim());
    format!(
        "{} {} from {{{}}}: {excerpt} ({count} entries)",
        first.level.label(),
        if count == 1 { "entry" } else { "entries" },
        first.source,
    )
}

fn cut_excerpt(text: &str) -> &str {
    if text.len() <= SUMMARY_EXCERPT_BYTES {
        return text;
    }
    let mut end = SUMMARY_EXCERPT_BYTES;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Whether a line opens a recognized multi-line block (traceback, stack
/// backtrace, stack frame).
#[must_use]
pub fn is_trace_header(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("traceback (most recent call last):")
        || lower.starts_with("stack backtrace:")
        || lower.starts_with("stack trace:")
        || lower.starts_with("caused by:")
    {
        return true;
    }

    if lower.starts_with("file \"") && lower.contains(", line ") {
        return true;
    }

    lower.starts_with("at ")
        && (lower.contains("::")
            || lower.contains(".py:")
            || lower.contains(".rs:")
            || lower.contains('('))
}
