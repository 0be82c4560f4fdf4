//! Gallery screen layout and pointer hit testing
//!
//! The layout computed for a frame is kept by the host so mouse events can be
//! classified against exactly what was last drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Responsive breakpoint for sizing arrows and thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols
    Compact,
    /// 60-99 cols
    Normal,
    /// 100+ cols
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Columns per thumbnail indicator
    fn thumb_width(self) -> u16 {
        match self {
            Breakpoint::Compact => 5,
            Breakpoint::Normal => 8,
            Breakpoint::Wide => 10,
        }
    }

    fn arrow_width(self) -> u16 {
        match self {
            Breakpoint::Compact => 3,
            _ => 5,
        }
    }
}

const THUMB_HEIGHT: u16 = 3;
const THUMB_GAP: u16 = 1;
const ARROW_HEIGHT: u16 = 3;

/// What a screen cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    PrevArrow,
    NextArrow,
    Thumbnail(usize),
    /// The media frame itself (the swipe surface)
    Frame,
    Outside,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryLayout {
    pub title: Rect,
    pub frame: Rect,
    pub prev_arrow: Option<Rect>,
    pub next_arrow: Option<Rect>,
    pub strip: Rect,
    /// Visible indicators with their playlist index
    pub thumbs: Vec<(usize, Rect)>,
    pub status: Rect,
}

impl GalleryLayout {
    /// Lay out the screen for a playlist of `len` items showing `current`.
    ///
    /// Arrows and the strip only exist when there is somewhere to navigate.
    pub fn compute(area: Rect, len: usize, current: usize) -> Self {
        let navigable = len >= 2;
        let strip_height = if navigable { THUMB_HEIGHT } else { 0 };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(strip_height),
                Constraint::Length(1),
            ])
            .split(area);
        let (title, frame, strip, status) = (rows[0], rows[1], rows[2], rows[3]);

        let bp = Breakpoint::from_width(area.width);
        let (prev_arrow, next_arrow) = if navigable {
            arrows(frame, bp.arrow_width())
        } else {
            (None, None)
        };
        let thumbs = if navigable {
            thumb_slots(strip, len, current, bp.thumb_width())
        } else {
            Vec::new()
        };

        Self {
            title,
            frame,
            prev_arrow,
            next_arrow,
            strip,
            thumbs,
            status,
        }
    }

    /// Classify a terminal cell. Arrows sit on top of the frame, so they win.
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let contains = |r: &Rect| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        };

        if self.prev_arrow.as_ref().is_some_and(contains) {
            return Hit::PrevArrow;
        }
        if self.next_arrow.as_ref().is_some_and(contains) {
            return Hit::NextArrow;
        }
        if let Some((index, _)) = self.thumbs.iter().find(|(_, r)| contains(r)) {
            return Hit::Thumbnail(*index);
        }
        if contains(&self.frame) {
            return Hit::Frame;
        }
        Hit::Outside
    }
}

/// Arrow buttons vertically centred on the frame's inner edges
fn arrows(frame: Rect, width: u16) -> (Option<Rect>, Option<Rect>) {
    // Need room for both arrows plus the frame border
    if frame.width < width * 2 + 4 || frame.height < ARROW_HEIGHT + 2 {
        return (None, None);
    }
    let y = frame.y + (frame.height - ARROW_HEIGHT) / 2;
    let prev = Rect::new(frame.x + 1, y, width, ARROW_HEIGHT);
    let next = Rect::new(frame.x + frame.width - 1 - width, y, width, ARROW_HEIGHT);
    (Some(prev), Some(next))
}

/// Centred run of indicators; when they do not all fit, a window that keeps
/// the current one visible
fn thumb_slots(strip: Rect, len: usize, current: usize, width: u16) -> Vec<(usize, Rect)> {
    let pitch = width + THUMB_GAP;
    let fit = ((strip.width + THUMB_GAP) / pitch) as usize;
    if fit == 0 {
        return Vec::new();
    }
    let shown = fit.min(len);
    let first = current
        .saturating_sub(shown / 2)
        .min(len - shown);

    let total = shown as u16 * pitch - THUMB_GAP;
    let x0 = strip.x + (strip.width - total) / 2;

    (0..shown)
        .map(|slot| {
            let rect = Rect::new(x0 + slot as u16 * pitch, strip.y, width, strip.height);
            (first + slot, rect)
        })
        .collect()
}
