//! Composed view pipeline: parse -> fold -> filter -> zone rendering.
//!
//! [`build_log_view`] is the full pass over a raw bundle. Callers that
//! already hold a [`ParseResult`] (the common case when only a filter, the
//! fold state, or the display zone changed) use [`assemble_view`], which
//! never re-runs the parser.

use std::collections::HashSet;

use chrono_tz::Tz;
use serde::Serialize;

use crate::filter::{apply_filters, FilterSelection, RenderRow};
use crate::fold::{fold, FoldOptions};
use crate::level::LogLevel;
use crate::parse::{parse, ParseOptions, ParseResult, RawLogBundle};
use crate::timestamp::render_in_zone;

/// Knobs for the full pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    pub parse: ParseOptions,
    pub fold: FoldOptions,
}

/// One row handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogViewRow {
    Entry {
        /// Timestamp rendered in the requested display zone; `None` when
        /// the entry had no parseable timestamp.
        display_timestamp: Option<String>,
        level: LogLevel,
        source: String,
        message: Vec<String>,
        group_id: Option<String>,
    },
    GroupSummary {
        id: String,
        summary: String,
        hidden_count: usize,
    },
}

/// The renderable output surface: rows, available source labels, and the
/// non-fatal parse warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogView {
    pub rows: Vec<LogViewRow>,
    pub sources: Vec<String>,
    pub warning: Option<String>,
}

impl LogView {
    /// View over no data at all ("no logs yet", not "malformed logs").
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            sources: Vec::new(),
            warning: None,
        }
    }
}

/// Full pass: parse the bundle, fold, filter, and render timestamps in
/// `zone`. Deterministic for identical inputs.
#[must_use]
pub fn build_log_view(
    bundle: &RawLogBundle,
    zone: Tz,
    selection: &FilterSelection,
    unfolded: &HashSet<String>,
    options: &PipelineOptions,
) -> LogView {
    let parsed = parse(bundle, &options.parse);
    assemble_view(&parsed, zone, selection, unfolded, &options.fold)
}

/// Fold + filter + zone rendering over an existing parse result. This is
/// the path for filter/fold/zone changes; the parser does not run.
#[must_use]
pub fn assemble_view(
    parsed: &ParseResult,
    zone: Tz,
    selection: &FilterSelection,
    unfolded: &HashSet<String>,
    fold_options: &FoldOptions,
) -> LogView {
    let folded = fold(parsed.entries.clone(), unfolded, fold_options);
    let rows = apply_filters(folded, selection)
        .into_iter()
        .map(|row| match row {
            RenderRow::Entry(entry) => LogViewRow::Entry {
                display_timestamp: entry.timestamp.map(|instant| render_in_zone(instant, zone)),
                level: entry.level,
                source: entry.source,
                message: entry.message,
                group_id: entry.group_id,
            },
            RenderRow::GroupSummary {
                id,
                summary,
                hidden_count,
            } => LogViewRow::GroupSummary {
                id,
                summary,
                hidden_count,
            },
        })
        .collect();

    LogView {
        rows,
        sources: parsed.sources.clone(),
        warning: parsed.warning.clone(),
    }
}
