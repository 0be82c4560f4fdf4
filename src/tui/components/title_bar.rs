// Title bar component

use crate::config::VERSION;
use crate::tui::ui::GalleryView;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, view: &GalleryView) {
    let theme = view.theme;
    let line = Line::from(vec![
        Span::styled(
            " Galeria",
            Style::default()
                .fg(theme.accent_dark)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  invite v{}", VERSION), Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
