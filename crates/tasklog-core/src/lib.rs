//! tasklog-core: log normalization and filtering engine for task-attempt logs.
//!
//! Takes the raw, possibly multi-source log text of one task attempt and
//! turns it into structured, leveled, timestamped entries; folds related
//! runs into collapsible groups; and applies level/source filters without
//! losing the grouping structure.
//!
//! # Architecture
//!
//! ```text
//! raw bundle
//!   -> classify_line (classify.rs)  => entry heads / continuations
//!   -> parse         (parse.rs)     => ParseResult { entries, sources, warning }
//!   -> fold          (fold.rs)      => Vec<FoldedItem> with stable group ids
//!   -> apply_filters (filter.rs)    => Vec<RenderRow>
//!   -> build_log_view (pipeline.rs) => LogView with zone-rendered timestamps
//! ```
//!
//! Every stage is a pure function of its inputs. Malformed input degrades
//! to best-effort structured output plus a warning; nothing in the parse
//! path panics or returns an error.

pub mod classify;
pub mod filter;
pub mod fold;
pub mod level;
pub mod parse;
pub mod pipeline;
pub mod timestamp;

pub use classify::{classify_line, LineClass, LineHead};
pub use filter::{apply_filters, FilterSelection, RenderRow};
pub use fold::{fold, FoldOptions, FoldedItem, LogGroup};
pub use level::LogLevel;
pub use parse::{parse, LogEntry, ParseOptions, ParseResult, RawLogBundle, RawLogSegment};
pub use pipeline::{assemble_view, build_log_view, LogView, LogViewRow, PipelineOptions};
pub use timestamp::{parse_instant, render_in_zone, resolve_zone, UnknownZone};
