//! Owned, cancelable debounce timer.
//!
//! Replaces the ambient global timer handle the cost recalculation would
//! otherwise need: the debouncer is owned by the state that uses it and
//! dies with it. Stale async responses are discarded by comparing the
//! generation counter captured when the request was issued.

use std::time::{Duration, Instant};

/// Deadline-based debouncer polled from the app tick.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            generation: 0,
        }
    }

    /// Registers an input change, (re)starting the quiet period.
    pub fn touch(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Cancels any pending fire.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true if the timer is armed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires if the quiet period has elapsed, returning the generation to
    /// tag the resulting request with. Subsequent `touch` calls bump the
    /// generation so stale responses can be recognized and dropped.
    pub fn fire_due(&mut self) -> Option<u64> {
        let deadline = self.deadline?;
        if Instant::now() < deadline {
            return None;
        }
        self.deadline = None;
        self.generation += 1;
        Some(self.generation)
    }

    /// Returns true if `generation` is the most recently fired one.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_before_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.touch();
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire_due(), None);
        assert!(debouncer.is_pending());
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.touch();
        assert_eq!(debouncer.fire_due(), Some(1));
        assert_eq!(debouncer.fire_due(), None);
    }

    #[test]
    fn cancel_disarms_pending_fire() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.touch();
        debouncer.cancel();
        assert_eq!(debouncer.fire_due(), None);
    }

    #[test]
    fn newer_fire_invalidates_older_generation() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.touch();
        let first = debouncer.fire_due().unwrap();
        debouncer.touch();
        let second = debouncer.fire_due().unwrap();
        assert!(debouncer.is_current(second));
        assert!(!debouncer.is_current(first));
    }
}
