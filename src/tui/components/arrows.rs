// Previous / next arrow buttons
//
// Drawn over the frame edges. Clicks on them are hit-tested as buttons, so
// they never start a swipe.

use crate::tui::layout::GalleryLayout;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, layout: &GalleryLayout, theme: &Theme) {
    if let Some(rect) = layout.prev_arrow {
        button(f, rect, "‹", theme);
    }
    if let Some(rect) = layout.next_arrow {
        button(f, rect, "›", theme);
    }
}

fn button(f: &mut Frame, rect: Rect, glyph: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg));
    let glyph = Paragraph::new(glyph)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.accent_dark)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    f.render_widget(Clear, rect);
    f.render_widget(glyph, rect);
}
