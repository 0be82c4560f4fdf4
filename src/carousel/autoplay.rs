//! Autoplay countdown
//!
//! "Advance after the current slide has been visible for `interval`": the
//! countdown restarts whenever the current index changes or the paused flag
//! toggles, so manual navigation always buys the new slide a full interval.

use super::timer::Timer;
use std::time::Duration;
use tokio::time::Instant;

/// Default time a slide stays on screen before autoplay advances
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5200);

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    interval: Duration,
    timer: Timer,
}

impl AutoplayScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: Timer::default(),
        }
    }

    /// Cancel the running countdown and start a fresh one if autoplay may run
    pub fn restart(&mut self, now: Instant, len: usize, paused: bool) {
        if len < 2 || paused || self.interval.is_zero() {
            self.timer.cancel();
        } else {
            self.timer.arm(now, self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub(super) fn take_due(&mut self, now: Instant) -> Option<Instant> {
        self.timer.take_due(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_countdown_for_short_playlists() {
        let t0 = Instant::now();
        let mut autoplay = AutoplayScheduler::new(DEFAULT_INTERVAL);
        autoplay.restart(t0, 1, false);
        assert_eq!(autoplay.deadline(), None);
        autoplay.restart(t0, 0, false);
        assert_eq!(autoplay.deadline(), None);
    }

    #[test]
    fn test_paused_clears_countdown() {
        let t0 = Instant::now();
        let mut autoplay = AutoplayScheduler::new(DEFAULT_INTERVAL);
        autoplay.restart(t0, 3, false);
        assert_eq!(autoplay.deadline(), Some(t0 + DEFAULT_INTERVAL));

        autoplay.restart(t0 + Duration::from_secs(1), 3, true);
        assert_eq!(autoplay.deadline(), None);
    }

    #[test]
    fn test_restart_measures_from_latest_change() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(3000);
        let mut autoplay = AutoplayScheduler::new(DEFAULT_INTERVAL);
        autoplay.restart(t0, 3, false);
        autoplay.restart(later, 3, false);
        assert_eq!(autoplay.take_due(t0 + DEFAULT_INTERVAL), None);
        assert_eq!(autoplay.take_due(later + DEFAULT_INTERVAL), Some(later + DEFAULT_INTERVAL));
    }
}
