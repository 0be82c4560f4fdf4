//! Threshold swipe recognition
//!
//! Pointer-down on the carousel surface starts tracking, pointer-move keeps
//! a running horizontal delta, and pointer-up (or cancel/leave) turns the
//! final delta into a navigation intent. The slide never follows the finger;
//! navigation is discrete.

/// Default swipe threshold in pixels
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 55.0;

/// What the pointer landed on when a gesture began
///
/// The terminal host only ever reports `Surface` and `Button`; the other
/// roles exist for hosts with richer hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    /// The carousel surface itself (or non-interactive media)
    Surface,
    Button,
    #[allow(dead_code)]
    Link,
    /// Form controls: inputs, text areas, selects
    #[allow(dead_code)]
    Input,
    #[allow(dead_code)]
    Label,
    /// A video element with native controls
    #[allow(dead_code)]
    Video,
}

impl TargetRole {
    /// Interactive controls keep their own pointer handling; a gesture that
    /// starts on one of them is never captured as a drag.
    pub fn is_interactive(self) -> bool {
        !matches!(self, TargetRole::Surface)
    }
}

/// Outcome of a completed gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Previous,
    Next,
    /// Tap or short drag
    Stay,
}

impl NavIntent {
    /// Dragging right reveals the previous slide, dragging left the next one.
    pub fn from_delta(delta_x: f32, threshold: f32) -> Self {
        if delta_x > threshold {
            NavIntent::Previous
        } else if delta_x < -threshold {
            NavIntent::Next
        } else {
            NavIntent::Stay
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    threshold: f32,
    start_x: Option<f32>,
    delta_x: f32,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl GestureTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
            delta_x: 0.0,
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.start_x.is_some()
    }

    #[cfg(test)]
    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    /// Start tracking unless the pointer landed on an interactive control.
    ///
    /// Returns true when the gesture was captured; the caller then pauses
    /// autoplay and captures the pointer to the carousel surface.
    pub fn pointer_down(&mut self, target: TargetRole, x: f32) -> bool {
        if target.is_interactive() {
            return false;
        }
        self.start_x = Some(x);
        self.delta_x = 0.0;
        true
    }

    pub fn pointer_move(&mut self, x: f32) {
        if let Some(start) = self.start_x {
            self.delta_x = x - start;
        }
    }

    /// Finish the gesture. `None` means no gesture was being tracked.
    ///
    /// Pointer-cancel and pointer-leave end a gesture the same way.
    pub fn pointer_up(&mut self) -> Option<NavIntent> {
        self.start_x.take()?;
        let delta = std::mem::take(&mut self.delta_x);
        Some(NavIntent::from_delta(delta, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(delta: f32) -> Option<NavIntent> {
        let mut tracker = GestureTracker::default();
        assert!(tracker.pointer_down(TargetRole::Surface, 200.0));
        tracker.pointer_move(200.0 + delta / 2.0);
        tracker.pointer_move(200.0 + delta);
        tracker.pointer_up()
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(swipe(56.0), Some(NavIntent::Previous));
        assert_eq!(swipe(55.0), Some(NavIntent::Stay));
        assert_eq!(swipe(0.0), Some(NavIntent::Stay));
        assert_eq!(swipe(-55.0), Some(NavIntent::Stay));
        assert_eq!(swipe(-56.0), Some(NavIntent::Next));
        assert_eq!(swipe(-80.0), Some(NavIntent::Next));
    }

    #[test]
    fn test_interactive_targets_are_ignored() {
        for role in [
            TargetRole::Button,
            TargetRole::Link,
            TargetRole::Input,
            TargetRole::Label,
            TargetRole::Video,
        ] {
            let mut tracker = GestureTracker::default();
            assert!(!tracker.pointer_down(role, 10.0), "{:?} should not start a drag", role);
            tracker.pointer_move(500.0);
            assert_eq!(tracker.pointer_up(), None);
        }
    }

    #[test]
    fn test_state_cleared_after_release() {
        let mut tracker = GestureTracker::default();
        tracker.pointer_down(TargetRole::Surface, 100.0);
        tracker.pointer_move(10.0);
        assert_eq!(tracker.pointer_up(), Some(NavIntent::Next));
        assert!(!tracker.is_active());
        assert_eq!(tracker.delta_x(), 0.0);

        // A stray release after the gesture ended does nothing
        assert_eq!(tracker.pointer_up(), None);
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut tracker = GestureTracker::default();
        tracker.pointer_move(300.0);
        assert_eq!(tracker.delta_x(), 0.0);
    }
}
