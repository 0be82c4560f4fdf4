//! Carousel state machine data
//!
//! The cross-fade is modelled as three explicit phases:
//!
//! ```text
//! Settled ──request_index──▶ Setup ──layers mounted──▶ Fading ──cleanup──▶ Settled
//!                              │                          │
//!                              └──────── cleanup ─────────┘
//! ```
//!
//! `Setup` is the gap where the incoming layer exists at opacity 0 but has
//! not started animating. It ends when the renderer reports that both
//! layers are mounted.

use std::time::Duration;
use tokio::time::Instant;

/// Transition phase of the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No transition in flight; only the current slide is shown
    Settled,
    /// Transition requested, incoming layer waiting to be mounted
    Setup { previous: usize },
    /// Both layers mounted, opacities animating since `since`
    Fading { previous: usize, since: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    current: usize,
    phase: Phase,
    paused: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselState {
    pub fn new() -> Self {
        Self {
            current: 0,
            phase: Phase::Settled,
            paused: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the outgoing slide, present only while a transition is in flight
    pub fn previous_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Settled => None,
            Phase::Setup { previous } | Phase::Fading { previous, .. } => Some(previous),
        }
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.phase, Phase::Fading { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn in_transition(&self) -> bool {
        self.phase != Phase::Settled
    }

    /// Move to `target`, keeping the slide that was showing as the outgoing layer.
    /// Any unfinished transition is discarded.
    pub(super) fn begin_transition(&mut self, target: usize) {
        debug_assert_ne!(target, self.current);
        self.phase = Phase::Setup {
            previous: self.current,
        };
        self.current = target;
    }

    /// Setup → Fading. Returns false if there was nothing waiting to fade.
    pub(super) fn start_fade(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Setup { previous } => {
                self.phase = Phase::Fading {
                    previous,
                    since: now,
                };
                true
            }
            _ => false,
        }
    }

    pub(super) fn settle(&mut self) {
        self.phase = Phase::Settled;
    }

    /// Returns true if the flag actually changed
    pub(super) fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }

    /// Linear progress of the fade in `[0, 1]`
    ///
    /// 0 during setup, 1 when settled.
    pub fn fade_progress(&self, now: Instant, fade: Duration) -> f32 {
        match self.phase {
            Phase::Settled => 1.0,
            Phase::Setup { .. } => 0.0,
            Phase::Fading { since, .. } => {
                if fade.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(since);
                (elapsed.as_secs_f32() / fade.as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CarouselState::new();
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.previous_index(), None);
        assert!(!state.is_fading());
        assert!(!state.is_paused());
    }

    #[test]
    fn test_phases_in_order() {
        let t0 = Instant::now();
        let mut state = CarouselState::new();

        state.begin_transition(2);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.previous_index(), Some(0));
        assert!(!state.is_fading());
        assert_eq!(state.fade_progress(t0, Duration::from_millis(1400)), 0.0);

        assert!(state.start_fade(t0));
        assert!(state.is_fading());
        assert!(!state.start_fade(t0), "already fading");

        let half = state.fade_progress(t0 + Duration::from_millis(700), Duration::from_millis(1400));
        assert!((half - 0.5).abs() < 1e-3);

        state.settle();
        assert_eq!(state.previous_index(), None);
        assert!(!state.is_fading());
    }
}
