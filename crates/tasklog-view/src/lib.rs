//! tasklog-view: viewer-side state for the task-attempt log screen.
//!
//! The presentation shell (buttons, dropdowns, fetch plumbing) stays
//! external; this crate owns the state it drives: which attempt is
//! selected, which fetches are still relevant, the active filters and fold
//! set, the display timezone, and the presentation-only configuration.
//! All log semantics live in `tasklog-core`.

pub mod attempt;
pub mod config;
pub mod external;
pub mod metadata;
pub mod session;

pub use attempt::AttemptSelector;
pub use config::{ViewerConfig, ViewerConfigError};
pub use external::external_log_url;
pub use metadata::TaskInstanceRef;
pub use session::{FetchTicket, LogSession};
