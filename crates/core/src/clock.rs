//! Time sources for gravity.
//!
//! The game never reads the wall clock directly. It asks a [`Clock`] how much
//! time passed since the previous query and accumulates that toward the fall
//! delay.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Time elapsed since the previous call (or since creation)
    fn elapsed(&mut self) -> Duration;
}

/// Monotonic wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `by` pass before the next query
    pub fn advance(&mut self, by: Duration) {
        self.pending += by;
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> Duration {
        std::mem::take(&mut self.pending)
    }
}
