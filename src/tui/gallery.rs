// Terminal host for the carousel
//
// Paints with ratatui and turns crossterm events into carousel inputs.
// Mouse columns are scaled by `cell_width_px` so the swipe threshold keeps
// its pixel meaning.

use super::layout::{GalleryLayout, Hit};
use super::theme::Theme;
use super::ui::{self, GalleryView};
use crate::carousel::{AssetProbe, Carousel, Host, Input, TargetRole};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use tokio::time::Instant;

pub struct TerminalHost<B: Backend> {
    terminal: Terminal<B>,
    events: EventStream,
    /// Inputs already translated but not yet handed out
    pending: VecDeque<Input>,
    /// Layout of the last drawn frame, for hit testing
    layout: GalleryLayout,
    assets: AssetProbe,
    theme: Theme,
    logs: Option<LogBuffer>,
    cell_width_px: u16,
}

impl<B: Backend> TerminalHost<B> {
    pub fn new(
        terminal: Terminal<B>,
        assets: AssetProbe,
        logs: Option<LogBuffer>,
        cell_width_px: u16,
    ) -> Self {
        Self {
            terminal,
            events: EventStream::new(),
            pending: VecDeque::new(),
            layout: GalleryLayout::default(),
            assets,
            theme: Theme::default(),
            logs,
            cell_width_px,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Host for TerminalHost<B> {
    fn draw(&mut self, carousel: &Carousel, now: Instant) -> Result<()> {
        let view = GalleryView {
            state: carousel.state(),
            len: carousel.len(),
            interval: carousel.config().interval,
            composition: carousel.compose(&self.assets, now),
            thumbs: carousel.thumbnails(&self.assets),
            latest_log: self.logs.as_ref().and_then(LogBuffer::latest),
            missing_assets: self.assets.missing_count(),
            theme: &self.theme,
        };

        let layout = &mut self.layout;
        self.terminal
            .draw(|f| *layout = ui::draw(f, &view))
            .context("Failed to draw gallery")?;
        Ok(())
    }

    async fn next_input(&mut self) -> Option<Input> {
        loop {
            if let Some(input) = self.pending.pop_front() {
                return Some(input);
            }
            match self.events.next().await? {
                Ok(event) => {
                    let inputs = translate(&event, &self.layout, self.cell_width_px);
                    self.pending.extend(inputs);
                }
                Err(e) => {
                    tracing::warn!("Terminal input error: {}", e);
                    return None;
                }
            }
        }
    }
}

/// Map one terminal event to carousel inputs
///
/// A press on an arrow or thumbnail yields the (ignored) button pointer-down
/// followed by the navigation it stands for, the same way a click on a
/// nested control both reaches the surface and triggers its own action.
pub fn translate(event: &Event, layout: &GalleryLayout, cell_width_px: u16) -> Vec<Input> {
    match event {
        Event::Key(key) => translate_key(key).into_iter().collect(),
        Event::Mouse(mouse) => translate_mouse(mouse, layout, cell_width_px),
        // Losing focus is the terminal's pointer-leave
        Event::FocusLost => vec![Input::PointerUp],
        Event::Resize(..) => vec![Input::Redraw],
        _ => Vec::new(),
    }
}

fn translate_key(key: &KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(Input::Prev),
        KeyCode::Right => Some(Input::Next),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent, layout: &GalleryLayout, cell_width_px: u16) -> Vec<Input> {
    let x = mouse.column as f32 * cell_width_px as f32;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let button = Input::PointerDown {
                target: TargetRole::Button,
                x,
            };
            match layout.hit(mouse.column, mouse.row) {
                Hit::PrevArrow => vec![button, Input::Prev],
                Hit::NextArrow => vec![button, Input::Next],
                Hit::Thumbnail(index) => vec![button, Input::Select(index)],
                // Slide videos are not interactive, so the whole frame is surface
                Hit::Frame => vec![Input::PointerDown {
                    target: TargetRole::Surface,
                    x,
                }],
                Hit::Outside => Vec::new(),
            }
        }
        // Captured pointer: moves count even outside the frame
        MouseEventKind::Drag(MouseButton::Left) => vec![Input::PointerMove { x }],
        MouseEventKind::Up(MouseButton::Left) => vec![Input::PointerUp],
        _ => Vec::new(),
    }
}
