//! Configuration options for reorder runs.

use std::time::Duration;

/// Column read from identifier files when none is given.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "Member";

/// Wait between copy and paste so the host can finish the previous operation.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Smallest settling delay accepted; zero is never used.
pub const MIN_SETTLE_DELAY: Duration = Duration::from_millis(1);

/// Options controlling how a slide order is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOptions {
    settle_delay: Duration,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl ReorderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settling delay, clamped to [`MIN_SETTLE_DELAY`].
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay.max(MIN_SETTLE_DELAY);
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_is_clamped() {
        let options = ReorderOptions::new().with_settle_delay(Duration::ZERO);
        assert_eq!(options.settle_delay(), MIN_SETTLE_DELAY);
    }

    #[test]
    fn default_delay() {
        assert_eq!(ReorderOptions::default().settle_delay(), DEFAULT_SETTLE_DELAY);
        let options = ReorderOptions::new().with_settle_delay(Duration::from_millis(20));
        assert_eq!(options.settle_delay(), Duration::from_millis(20));
    }
}
