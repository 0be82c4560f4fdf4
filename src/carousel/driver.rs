//! Cooperative event loop for one mounted carousel
//!
//! All state changes happen on this loop, in the order inputs arrive. The
//! loop waits on whichever comes first: the host's next input, the carousel's
//! earliest timer, or the next animation frame while a fade is running.
//! When the loop ends the carousel is unmounted, which drops every pending
//! timer with it.

use super::{Carousel, TargetRole};
use anyhow::Result;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Frame interval while a cross-fade is animating (~30 FPS)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Host-agnostic input, already hit-tested by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    PointerDown { target: TargetRole, x: f32 },
    PointerMove { x: f32 },
    /// Release, cancel, and leave all end a gesture
    PointerUp,
    /// Thumbnail indicator clicked
    Select(usize),
    Prev,
    Next,
    /// Host surface changed (resize); repaint without touching state
    Redraw,
    Quit,
}

/// Something that can paint a carousel and deliver its input
///
/// `next_input` must be cancel-safe: the loop drops the pending future when a
/// timer wins the race and calls it again on the next iteration.
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Paint the current composition. Called before every wait.
    fn draw(&mut self, carousel: &Carousel, now: Instant) -> Result<()>;

    /// Next input, or `None` when the input source is closed
    async fn next_input(&mut self) -> Option<Input>;
}

/// Run the carousel until the host quits or its input closes
pub async fn drive<H: Host>(mut carousel: Carousel, host: &mut H) -> Result<()> {
    let result = run_loop(&mut carousel, host).await;
    carousel.unmount();
    result
}

async fn run_loop<H: Host>(carousel: &mut Carousel, host: &mut H) -> Result<()> {
    loop {
        let now = Instant::now();
        host.draw(carousel, now)?;

        // Layers are on screen now; a pending transition may start fading
        let animating = carousel.on_layers_mounted(now) || carousel.state().is_fading();

        let frame = animating.then(|| now + FRAME_INTERVAL);
        let wake = match (carousel.next_deadline(), frame) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        tokio::select! {
            input = host.next_input() => {
                let Some(input) = input else {
                    tracing::debug!("Carousel input closed");
                    return Ok(());
                };
                if !apply(carousel, input, Instant::now()) {
                    return Ok(());
                }
            }
            _ = sleep_or_forever(wake) => {
                carousel.advance(Instant::now());
            }
        }
    }
}

/// Apply one input. Returns false when the host asked to quit.
fn apply(carousel: &mut Carousel, input: Input, now: Instant) -> bool {
    match input {
        Input::PointerDown { target, x } => {
            carousel.pointer_down(target, x, now);
        }
        Input::PointerMove { x } => carousel.pointer_move(x),
        Input::PointerUp => {
            carousel.pointer_up(now);
        }
        Input::Select(index) => {
            carousel.select_thumbnail(index, now);
        }
        Input::Prev => {
            carousel.prev(now);
        }
        Input::Next => {
            carousel.next(now);
        }
        Input::Redraw => {}
        Input::Quit => return false,
    }
    true
}

async fn sleep_or_forever(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
