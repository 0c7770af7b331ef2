//! Level/source filtering over the folded sequence.
//!
//! An empty level or source set means "no restriction on that dimension";
//! the default selection passes everything. Filtering is a lightweight
//! transform over already-parsed, already-folded structure and never
//! re-triggers parsing.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::fold::{FoldedItem, LogGroup};
use crate::level::LogLevel;
use crate::parse::LogEntry;

/// The user's current filter selection. Owned by the presentation layer
/// and passed by value into the engine; nothing here persists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    /// Allowed levels; empty = all levels pass.
    pub levels: BTreeSet<LogLevel>,
    /// Allowed source labels; empty = all sources pass.
    pub sources: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection that restricts nothing.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Whether both dimensions are unrestricted.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.levels.is_empty() && self.sources.is_empty()
    }

    /// Whether a single entry passes both dimensions.
    #[must_use]
    pub fn allows(&self, entry: &LogEntry) -> bool {
        (self.levels.is_empty() || self.levels.contains(&entry.level))
            && (self.sources.is_empty() || self.sources.contains(&entry.source))
    }

    /// Drop source values that are not present in `available`. Stale
    /// selections from a previous attempt must be removed, not left
    /// silently inert.
    pub fn retain_known_sources(&mut self, available: &[String]) {
        self.sources.retain(|source| available.contains(source));
    }
}

/// One renderable row after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderRow {
    /// A plain entry, or a member of an expanded group (then `group_id`
    /// is set on the entry).
    Entry(LogEntry),
    /// A passing, collapsed group: one summary row standing in for its
    /// hidden entries.
    GroupSummary {
        id: String,
        summary: String,
        hidden_count: usize,
    },
}

/// Apply the selection to a folded sequence.
///
/// A group passes iff at least one constituent entry passes. A passing,
/// collapsed group renders its summary row unfiltered; a passing, expanded
/// group emits all of its entries unmutated. Folding is filter-independent.
#[must_use]
pub fn apply_filters(folded: Vec<FoldedItem>, selection: &FilterSelection) -> Vec<RenderRow> {
    let mut rows = Vec::new();
    for item in folded {
        match item {
            FoldedItem::Entry(entry) => {
                if selection.allows(&entry) {
                    rows.push(RenderRow::Entry(entry));
                }
            }
            FoldedItem::Group(group) => {
                if group.entries.iter().any(|entry| selection.allows(entry)) {
                    push_group(&mut rows, group);
                }
            }
        }
    }
    rows
}

fn push_group(rows: &mut Vec<RenderRow>, group: LogGroup) {
    if group.expanded {
        rows.extend(group.entries.into_iter().map(RenderRow::Entry));
    } else {
        rows.push(RenderRow::GroupSummary {
            id: group.id,
            summary: group.collapsed_summary,
            hidden_count: group.entries.len(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::fold::{fold, FoldOptions};
    use crate::timestamp::parse_instant;

    fn entry(source: &str, level: LogLevel, text: &str) -> LogEntry {
        LogEntry {
            timestamp: parse_instant("2024-01-01T00:00:00Z"),
            level,
            source: source.to_owned(),
            message: vec![text.to_owned()],
            group_id: None,
        }
    }

    fn sample() -> Vec<FoldedItem> {
        vec![
            FoldedItem::Entry(entry("worker1", LogLevel::Info, "start")),
            FoldedItem::Entry(entry("worker2", LogLevel::Error, "boom")),
            FoldedItem::Entry(entry("worker1", LogLevel::Debug, "detail")),
        ]
    }

    #[test]
    fn empty_selection_passes_everything() {
        let rows = apply_filters(sample(), &FilterSelection::unrestricted());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn level_filter_drops_other_levels() {
        let selection = FilterSelection {
            levels: BTreeSet::from([LogLevel::Error]),
            ..FilterSelection::default()
        };
        let rows = apply_filters(sample(), &selection);
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            RenderRow::Entry(entry) => assert_eq!(entry.first_line(), "boom"),
            other => panic!("expected entry, got {other:?}"),
        }
    }

    #[test]
    fn source_filter_drops_other_sources() {
        let selection = FilterSelection {
            sources: BTreeSet::from(["worker1".to_owned()]),
            ..FilterSelection::default()
        };
        let rows = apply_filters(sample(), &selection);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let selection = FilterSelection {
            levels: BTreeSet::from([LogLevel::Info]),
            sources: BTreeSet::from(["worker2".to_owned()]),
        };
        let rows = apply_filters(sample(), &selection);
        assert!(rows.is_empty());
    }

    fn folded_run(level: LogLevel) -> Vec<FoldedItem> {
        let entries = (0..4)
            .map(|i| entry("worker1", level, &format!("repeat {i}")))
            .collect();
        fold(entries, &HashSet::new(), &FoldOptions::default())
    }

    #[test]
    fn collapsed_group_passes_as_one_summary_row() {
        let selection = FilterSelection {
            levels: BTreeSet::from([LogLevel::Info]),
            ..FilterSelection::default()
        };
        let rows = apply_filters(folded_run(LogLevel::Info), &selection);
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            RenderRow::GroupSummary { hidden_count, .. } => assert_eq!(*hidden_count, 4),
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn group_with_no_passing_member_is_dropped() {
        let selection = FilterSelection {
            levels: BTreeSet::from([LogLevel::Critical]),
            ..FilterSelection::default()
        };
        let rows = apply_filters(folded_run(LogLevel::Info), &selection);
        assert!(rows.is_empty());
    }

    #[test]
    fn expanded_group_emits_all_entries() {
        let mut folded = folded_run(LogLevel::Info);
        let id = match &mut folded[0] {
            FoldedItem::Group(group) => {
                group.expanded = true;
                group.id.clone()
            }
            FoldedItem::Entry(_) => panic!("expected a group"),
        };
        let rows = apply_filters(folded, &FilterSelection::unrestricted());
        assert_eq!(rows.len(), 4);
        for row in &rows {
            match row {
                RenderRow::Entry(entry) => assert_eq!(entry.group_id.as_ref(), Some(&id)),
                other => panic!("expected entry, got {other:?}"),
            }
        }
    }

    #[test]
    fn retain_known_sources_drops_stale_values() {
        let mut selection = FilterSelection {
            sources: BTreeSet::from(["worker1".to_owned(), "worker2".to_owned()]),
            ..FilterSelection::default()
        };
        selection.retain_known_sources(&["worker1".to_owned()]);
        assert_eq!(selection.sources, BTreeSet::from(["worker1".to_owned()]));

        selection.retain_known_sources(&[]);
        assert!(selection.sources.is_empty());
        assert!(selection.is_unrestricted());
    }
}
