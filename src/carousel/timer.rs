//! Restartable one-shot deadline
//!
//! The carousel owns its timers as plain deadlines instead of spawned tasks:
//! arming replaces any previous deadline, cancelling clears it, and the
//! driver sleeps until the earliest armed deadline. Dropping the owner drops
//! the timer, so nothing can fire after teardown.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Arm (or re-arm) the timer to fire `after` from `now`
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed, returning the instant it was due
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(at)
            }
            _ => None,
        }
    }
}
