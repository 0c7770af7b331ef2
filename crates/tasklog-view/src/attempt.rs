//! Attempt ("try number") selection with range clamping.
//!
//! Invariant after every mutation: `1 <= selected <= max`. Out-of-range
//! requests are corrected silently; they are never surfaced as errors.

/// Tracks which attempt of a task instance is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptSelector {
    selected: u32,
    max: u32,
}

impl AttemptSelector {
    /// Selector for a task with `max` recorded attempts, starting on the
    /// latest one. A zero `max` is treated as 1.
    #[must_use]
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { selected: max, max }
    }

    #[must_use]
    pub fn selected(&self) -> u32 {
        self.selected
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Select an attempt, clamped into `[1, max]`. Returns the attempt
    /// actually selected.
    pub fn select(&mut self, attempt: u32) -> u32 {
        self.selected = attempt.clamp(1, self.max);
        self.selected
    }

    /// Update the recorded attempt count (e.g. after navigating to a
    /// different task instance). Shrinking below the current selection
    /// clamps the selection down.
    pub fn set_max(&mut self, max: u32) {
        self.max = max.max(1);
        if self.selected > self.max {
            self.selected = self.max;
        }
    }
}
