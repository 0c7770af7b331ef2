//! Interactive log-viewing session for one task instance.
//!
//! Owns the state the presentation layer mutates: attempt selection,
//! filters, fold set, display zone, and the cached parse of the current
//! attempt's logs. Fetching raw text is the collaborator's job; the
//! session only hands out tickets and decides whether a completed fetch is
//! still relevant (last-request-wins, keyed by attempt number).
//!
//! Filter, fold, and timezone changes rebuild the view from the cached
//! parse; the parser re-runs only when new raw text lands.

use std::collections::{BTreeSet, HashSet};

use chrono_tz::Tz;

use tasklog_core::{
    assemble_view, parse, FilterSelection, LogLevel, LogView, ParseResult, PipelineOptions,
    RawLogBundle, UnknownZone,
};

/// Proof of an issued fetch, keyed by the attempt it was issued for.
/// A completion whose ticket no longer matches the current selection is
/// dropped without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    attempt: u32,
}

impl FetchTicket {
    /// The attempt this fetch was issued for.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

/// Viewer session state for one task instance.
#[derive(Debug, Clone)]
pub struct LogSession {
    selector: crate::attempt::AttemptSelector,
    filters: FilterSelection,
    unfolded: HashSet<String>,
    zone: Tz,
    options: PipelineOptions,
    parsed: Option<ParseResult>,
}

impl LogSession {
    /// Session for a task with `max_attempt` recorded attempts, viewing in
    /// UTC until a zone preference is applied.
    #[must_use]
    pub fn new(max_attempt: u32) -> Self {
        Self {
            selector: crate::attempt::AttemptSelector::new(max_attempt),
            filters: FilterSelection::unrestricted(),
            unfolded: HashSet::new(),
            zone: Tz::UTC,
            options: PipelineOptions::default(),
            parsed: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn selected_attempt(&self) -> u32 {
        self.selector.selected()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Select an attempt. Cached logs belong to the previous attempt, so a
    /// change drops them (and any fold state) until a new fetch completes.
    /// Returns the attempt actually selected after clamping.
    pub fn select_attempt(&mut self, attempt: u32) -> u32 {
        let previous = self.selector.selected();
        let selected = self.selector.select(attempt);
        if selected != previous {
            self.parsed = None;
            self.unfolded.clear();
        }
        selected
    }

    /// Update the recorded attempt count; the selection clamps down when
    /// the count shrinks.
    pub fn set_max_attempt(&mut self, max: u32) {
        let previous = self.selector.selected();
        self.selector.set_max(max);
        if self.selector.selected() != previous {
            self.parsed = None;
            self.unfolded.clear();
        }
    }

    /// Issue a fetch ticket for the currently selected attempt. The caller
    /// passes it back with the raw text once the fetch resolves.
    #[must_use]
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket {
            attempt: self.selector.selected(),
        }
    }

    /// Apply a completed fetch. Returns `true` if the bundle was applied;
    /// a stale ticket (the user has since selected another attempt) is
    /// silently discarded.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, bundle: &RawLogBundle) -> bool {
        if ticket.attempt != self.selector.selected() {
            return false;
        }
        let parsed = parse(bundle, &self.options.parse);
        // Source-filter values that no longer exist in the new data are
        // dropped, not left silently inert.
        self.filters.retain_known_sources(&parsed.sources);
        self.parsed = Some(parsed);
        true
    }

    /// Toggle a group's fold state. Returns `true` when the group is now
    /// expanded.
    pub fn toggle_group(&mut self, group_id: &str) -> bool {
        if self.unfolded.remove(group_id) {
            false
        } else {
            self.unfolded.insert(group_id.to_owned());
            true
        }
    }

    pub fn set_level_filter(&mut self, levels: BTreeSet<LogLevel>) {
        self.filters.levels = levels;
    }

    pub fn set_source_filter(&mut self, sources: BTreeSet<String>) {
        self.filters.sources = sources;
    }

    /// Apply an IANA zone preference. Display-only: the cached parse is
    /// kept, instants are stored zone-independent.
    pub fn set_timezone(&mut self, name: &str) -> Result<(), UnknownZone> {
        self.zone = tasklog_core::resolve_zone(name)?;
        Ok(())
    }

    /// Build the renderable view from current state. No data fetched yet
    /// means an empty view, not a warning.
    #[must_use]
    pub fn view(&self) -> LogView {
        match &self.parsed {
            Some(parsed) => assemble_view(
                parsed,
                self.zone,
                &self.filters,
                &self.unfolded,
                &self.options.fold,
            ),
            None => LogView::empty(),
        }
    }
}
