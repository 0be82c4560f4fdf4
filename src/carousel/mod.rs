// Carousel module - media gallery state machine
//
// Cycles through a playlist of images and videos with cross-fade transitions.
// Three navigation sources feed one entry point (`request_index`):
// - Gestures: pointer drags past a pixel threshold
// - Thumbnails / arrows: direct jumps
// - Autoplay: a countdown owned by the carousel itself
//
// The carousel never spawns tasks. Its two timers (autoplay countdown and
// transition cleanup) are deadlines the host sleeps on; `advance()` fires
// whatever is due. Dropping or unmounting the carousel drops the timers.

pub mod autoplay;
pub mod driver;
pub mod gesture;
pub mod playlist;
pub mod render;
pub mod state;
pub mod thumbnails;
pub mod timer;

pub use driver::{drive, Host, Input};
pub use gesture::{NavIntent, TargetRole};
pub use playlist::{AssetProbe, MediaItem, Playlist};
pub use render::{Composition, Layer, MediaElement};
pub use state::CarouselState;
pub use thumbnails::{Indicator, ThumbFace};

use autoplay::AutoplayScheduler;
use gesture::GestureTracker;
use std::time::Duration;
use timer::Timer;
use tokio::time::Instant;

/// Timing and input tuning for one carousel instance
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// How long a slide stays before autoplay advances
    pub interval: Duration,
    /// Cross-fade duration
    pub fade: Duration,
    /// Extra time after the fade before the outgoing layer is dropped
    pub fade_slack: Duration,
    /// Horizontal drag distance (px) that counts as a swipe
    pub swipe_threshold_px: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: autoplay::DEFAULT_INTERVAL,
            fade: Duration::from_millis(1400),
            fade_slack: Duration::from_millis(60),
            swipe_threshold_px: gesture::DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }
}

#[derive(Debug)]
pub struct Carousel {
    playlist: Playlist,
    config: CarouselConfig,
    state: CarouselState,
    gesture: GestureTracker,
    autoplay: AutoplayScheduler,
    cleanup: Timer,
}

impl Carousel {
    /// Mount a carousel at slide 0 and start the autoplay countdown
    pub fn mount(playlist: Playlist, config: CarouselConfig, now: Instant) -> Self {
        let mut carousel = Self {
            gesture: GestureTracker::new(config.swipe_threshold_px),
            autoplay: AutoplayScheduler::new(config.interval),
            playlist,
            config,
            state: CarouselState::new(),
            cleanup: Timer::default(),
        };
        carousel.restart_autoplay(now);
        tracing::debug!(items = carousel.playlist.len(), "Carousel mounted");
        carousel
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Single navigation entry point.
    ///
    /// No-op for playlists shorter than two or when `target` already is the
    /// current slide (modulo length). Otherwise supersedes any transition in
    /// flight: its cleanup is cancelled and its outgoing layer discarded, the
    /// slide that was showing becomes the new outgoing layer, and the fade
    /// and autoplay countdowns restart from `now`.
    ///
    /// Returns true if a transition started.
    pub fn request_index(&mut self, target: usize, now: Instant) -> bool {
        let len = self.playlist.len();
        if len < 2 {
            return false;
        }
        let target = target % len;
        if target == self.state.current_index() {
            return false;
        }

        self.cleanup.cancel();
        let from = self.state.current_index();
        self.state.begin_transition(target);
        self.cleanup.arm(now, self.config.fade + self.config.fade_slack);
        self.restart_autoplay(now);

        tracing::debug!(from, to = target, "Carousel transition requested");
        true
    }

    pub fn next(&mut self, now: Instant) -> bool {
        let len = self.playlist.len();
        if len < 2 {
            return false;
        }
        self.request_index((self.state.current_index() + 1) % len, now)
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        let len = self.playlist.len();
        if len < 2 {
            return false;
        }
        self.request_index((self.state.current_index() + len - 1) % len, now)
    }

    /// Thumbnail click: direct jump, no threshold logic involved
    pub fn select_thumbnail(&mut self, index: usize, now: Instant) -> bool {
        self.request_index(index, now)
    }

    /// Post-mount callback from the renderer: both layers are on screen, the
    /// incoming one at opacity 0, so the fade may begin.
    pub fn on_layers_mounted(&mut self, now: Instant) -> bool {
        self.state.start_fade(now)
    }

    /// Pointer pressed on the carousel. Returns true if the gesture was
    /// captured (the host should route later pointer events here even when
    /// the pointer leaves the carousel bounds).
    pub fn pointer_down(&mut self, target: TargetRole, x: f32, now: Instant) -> bool {
        if !self.gesture.pointer_down(target, x) {
            return false;
        }
        self.set_paused(true, now);
        true
    }

    pub fn pointer_move(&mut self, x: f32) {
        self.gesture.pointer_move(x);
    }

    /// Pointer released, cancelled, or left the surface.
    ///
    /// Returns the recognised intent, or `None` if no gesture was active.
    /// Autoplay resumes whatever the outcome.
    pub fn pointer_up(&mut self, now: Instant) -> Option<NavIntent> {
        let intent = self.gesture.pointer_up()?;
        match intent {
            NavIntent::Previous => {
                self.prev(now);
            }
            NavIntent::Next => {
                self.next(now);
            }
            NavIntent::Stay => {}
        }
        self.set_paused(false, now);
        Some(intent)
    }

    /// Earliest pending timer, for the host to sleep on
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.cleanup.deadline(), self.autoplay.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer due at `now`, in deadline order. Each timer acts at
    /// the instant it was due, so a late host does not skew the schedule.
    ///
    /// Returns true if state changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        loop {
            let cleanup_at = self.cleanup.deadline().filter(|at| *at <= now);
            let autoplay_at = self.autoplay.deadline().filter(|at| *at <= now);

            match (cleanup_at, autoplay_at) {
                (Some(c), Some(a)) if c <= a => self.fire_cleanup(now),
                (Some(_), None) => self.fire_cleanup(now),
                (_, Some(_)) => {
                    if let Some(at) = self.autoplay.take_due(now) {
                        tracing::trace!("Autoplay advancing");
                        self.next(at);
                    }
                }
                (None, None) => break,
            }
            changed = true;
        }
        changed
    }

    fn fire_cleanup(&mut self, now: Instant) {
        if self.cleanup.take_due(now).is_some() {
            self.state.settle();
        }
    }

    /// Layers to paint at `now`
    pub fn compose<'a>(&'a self, assets: &AssetProbe, now: Instant) -> Option<Composition<'a>> {
        render::compose(&self.state, &self.playlist, assets, self.config.fade, now)
    }

    pub fn thumbnails<'a>(&'a self, assets: &AssetProbe) -> Vec<Indicator<'a>> {
        thumbnails::indicators(&self.playlist, self.state.current_index(), assets)
    }

    /// Tear down: cancel every pending timer. Consumes the carousel so no
    /// callback can touch its state afterwards.
    pub fn unmount(mut self) {
        self.cleanup.cancel();
        self.autoplay.cancel();
        tracing::debug!(index = self.state.current_index(), "Carousel unmounted");
    }

    fn set_paused(&mut self, paused: bool, now: Instant) {
        if self.state.set_paused(paused) {
            self.restart_autoplay(now);
        }
    }

    fn restart_autoplay(&mut self, now: Instant) {
        self.autoplay
            .restart(now, self.playlist.len(), self.state.is_paused());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn three_items() -> Playlist {
        Playlist::new(vec![
            MediaItem::image("a"),
            MediaItem::image("b"),
            MediaItem::video("c"),
        ])
    }

    fn window(config: &CarouselConfig) -> Duration {
        config.fade + config.fade_slack
    }

    #[test]
    fn test_request_index_settles_on_target_modulo_len() {
        for len in 2..6usize {
            for target in 0..(3 * len) {
                let t0 = Instant::now();
                let items = (0..len).map(|i| MediaItem::image(i.to_string())).collect();
                let mut carousel = Carousel::mount(Playlist::new(items), CarouselConfig::default(), t0);

                carousel.request_index(target, t0);
                carousel.on_layers_mounted(t0);
                carousel.advance(t0 + window(carousel.config()));

                assert_eq!(carousel.state().current_index(), target % len);
                assert_eq!(carousel.state().previous_index(), None);
                assert!(!carousel.state().is_fading());
            }
        }
    }

    #[test]
    fn test_next_then_prev_round_trips() {
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(three_items(), CarouselConfig::default(), t0);
        for start in 0..3 {
            carousel.request_index(start, t0);
            let before = carousel.state().current_index();
            carousel.next(t0);
            carousel.prev(t0);
            assert_eq!(carousel.state().current_index(), before);
        }

        // Wraparound in both directions
        carousel.request_index(0, t0);
        carousel.prev(t0);
        assert_eq!(carousel.state().current_index(), 2);
        carousel.next(t0);
        assert_eq!(carousel.state().current_index(), 0);
    }

    #[test]
    fn test_short_playlists_never_navigate() {
        let t0 = Instant::now();
        for playlist in [Playlist::default(), Playlist::new(vec![MediaItem::image("only")])] {
            let mut carousel = Carousel::mount(playlist, CarouselConfig::default(), t0);
            assert!(!carousel.next(t0));
            assert!(!carousel.prev(t0));
            assert!(!carousel.request_index(7, t0));
            assert!(!carousel.select_thumbnail(0, t0));
            assert_eq!(carousel.state().current_index(), 0);
            assert_eq!(carousel.state().previous_index(), None);
            assert_eq!(carousel.next_deadline(), None);
            assert!(!carousel.advance(t0 + Duration::from_secs(600)));
        }
    }

    #[test]
    fn test_requesting_current_index_is_noop() {
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(three_items(), CarouselConfig::default(), t0);
        assert!(!carousel.request_index(0, t0));
        assert!(!carousel.request_index(3, t0));
        assert!(!carousel.state().in_transition());
    }

    #[test]
    fn test_setup_phase_waits_for_mount() {
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(three_items(), CarouselConfig::default(), t0);
        carousel.next(t0);
        assert_eq!(carousel.state().previous_index(), Some(0));
        assert!(!carousel.state().is_fading());

        assert!(carousel.on_layers_mounted(t0 + ms(16)));
        assert!(carousel.state().is_fading());
        assert!(!carousel.on_layers_mounted(t0 + ms(32)));
    }

    #[test]
    fn test_new_transition_supersedes_pending_cleanup() {
        let t0 = Instant::now();
        let config = CarouselConfig::default();
        let mut carousel = Carousel::mount(three_items(), config.clone(), t0);

        carousel.next(t0);
        carousel.on_layers_mounted(t0);

        // Second request halfway through the first fade
        let t1 = t0 + ms(700);
        carousel.next(t1);
        assert_eq!(carousel.state().current_index(), 2);
        assert_eq!(carousel.state().previous_index(), Some(1));

        // The first cleanup would have fired here; it was cancelled
        carousel.advance(t0 + window(&config));
        assert_eq!(carousel.state().previous_index(), Some(1));

        carousel.advance(t1 + window(&config));
        assert_eq!(carousel.state().previous_index(), None);
    }

    #[test]
    fn test_autoplay_scenario_with_swipe() {
        let t0 = Instant::now();
        let config = CarouselConfig::default();
        let mut carousel = Carousel::mount(three_items(), config.clone(), t0);

        assert!(!carousel.advance(t0 + ms(5199)));
        assert_eq!(carousel.state().current_index(), 0);

        let t1 = t0 + ms(5200);
        assert!(carousel.advance(t1));
        assert_eq!(carousel.state().current_index(), 1);

        // Drag left by 80px at index 1
        let t2 = t1 + ms(2000);
        assert!(carousel.pointer_down(TargetRole::Surface, 300.0, t2));
        carousel.pointer_move(260.0);
        carousel.pointer_move(220.0);
        assert_eq!(carousel.pointer_up(t2 + ms(150)), Some(NavIntent::Next));
        assert_eq!(carousel.state().current_index(), 2);

        // Countdown measured from the swipe, not from the autoplay advance
        let swiped_at = t2 + ms(150);
        carousel.advance(t1 + config.interval);
        assert_eq!(carousel.state().current_index(), 2);
        carousel.advance(swiped_at + config.interval);
        assert_eq!(carousel.state().current_index(), 0);
    }

    #[test]
    fn test_paused_blocks_autoplay_and_release_restarts_countdown() {
        let t0 = Instant::now();
        let config = CarouselConfig::default();
        let mut carousel = Carousel::mount(three_items(), config.clone(), t0);

        assert!(carousel.pointer_down(TargetRole::Surface, 100.0, t0 + ms(1000)));
        assert!(carousel.state().is_paused());
        assert_eq!(carousel.next_deadline(), None);
        assert!(!carousel.advance(t0 + Duration::from_secs(60)));
        assert_eq!(carousel.state().current_index(), 0);

        // Short drag: no navigation, but autoplay resumes
        let up = t0 + Duration::from_secs(61);
        carousel.pointer_move(130.0);
        assert_eq!(carousel.pointer_up(up), Some(NavIntent::Stay));
        assert!(!carousel.state().is_paused());
        assert_eq!(carousel.next_deadline(), Some(up + config.interval));
    }

    #[test]
    fn test_gesture_on_interactive_control_is_not_captured() {
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(three_items(), CarouselConfig::default(), t0);
        assert!(!carousel.pointer_down(TargetRole::Button, 100.0, t0));
        assert!(!carousel.state().is_paused());
        carousel.pointer_move(0.0);
        assert_eq!(carousel.pointer_up(t0), None);
        assert_eq!(carousel.state().current_index(), 0);
    }

    #[test]
    fn test_swipe_right_goes_previous_exactly_once() {
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(three_items(), CarouselConfig::default(), t0);
        carousel.pointer_down(TargetRole::Surface, 100.0, t0);
        carousel.pointer_move(170.0);
        assert_eq!(carousel.pointer_up(t0), Some(NavIntent::Previous));
        assert_eq!(carousel.state().current_index(), 2);
        assert_eq!(carousel.state().previous_index(), Some(0));
    }

    #[test]
    fn test_thumbnail_click_triggers_single_transition() {
        let t0 = Instant::now();
        let mut carousel = Carousel::mount(three_items(), CarouselConfig::default(), t0);
        assert!(carousel.select_thumbnail(2, t0));
        assert_eq!(carousel.state().current_index(), 2);
        assert_eq!(carousel.state().previous_index(), Some(0));
        assert!(!carousel.select_thumbnail(2, t0));
    }

    #[test]
    fn test_autoplay_acts_at_its_deadline_when_host_is_late() {
        let t0 = Instant::now();
        let config = CarouselConfig::default();
        let mut carousel = Carousel::mount(three_items(), config.clone(), t0);

        // Host wakes up well after two intervals have passed
        carousel.advance(t0 + config.interval * 2 + ms(10));
        assert_eq!(carousel.state().current_index(), 2);
        assert_eq!(
            carousel.next_deadline(),
            Some(t0 + config.interval * 2 + window(&config))
        );
    }
}
