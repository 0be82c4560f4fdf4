// Status bar component
//
// Playback state on the left, then the most recent log line, key hints last.

use super::fit_width;
use crate::tui::ui::GalleryView;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HINTS: &str = " ←/→ navigate · drag to swipe · q quit ";

pub fn render(f: &mut Frame, area: Rect, view: &GalleryView) {
    let theme = view.theme;
    let mut state = playback_label(view);
    if view.missing_assets > 0 {
        state.push_str(&format!(" · {} missing", view.missing_assets));
    }

    let log = view
        .latest_log
        .as_ref()
        .map(|entry| {
            format!(
                " │ {} {} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.level.as_str(),
                entry.message
            )
        })
        .unwrap_or_default();

    let width = area.width as usize;
    let room = width.saturating_sub(state.chars().count() + HINTS.chars().count());
    let line = Line::from(vec![
        Span::styled(state, Style::default().fg(theme.accent_dark)),
        Span::styled(fit_width(&log, room), Style::default().fg(theme.muted)),
    ]);

    f.render_widget(Paragraph::new(line), area);

    let hints_width = HINTS.chars().count() as u16;
    if area.width > hints_width {
        let hints = Rect::new(area.x + area.width - hints_width, area.y, hints_width, 1);
        f.render_widget(
            Paragraph::new(HINTS).style(Style::default().fg(theme.muted)),
            hints,
        );
    }
}

fn playback_label(view: &GalleryView) -> String {
    if view.len < 2 {
        " ■ static".to_string()
    } else if view.state.is_paused() {
        " ❚❚ paused".to_string()
    } else if let Some(previous) = view.state.previous_index() {
        format!(" ⇄ {} → {}", previous + 1, view.state.current_index() + 1)
    } else {
        format!(" ▶ every {:.1}s", view.interval.as_secs_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{AssetProbe, Carousel, CarouselConfig, MediaItem, Playlist};
    use crate::tui::theme::Theme;
    use tokio::time::Instant;

    #[test]
    fn label_follows_playback_state() {
        let now = Instant::now();
        let playlist = Playlist::new(vec![
            MediaItem::image("/a.jpg"),
            MediaItem::image("/b.jpg"),
            MediaItem::image("/c.jpg"),
        ]);
        let mut carousel = Carousel::mount(playlist, CarouselConfig::default(), now);
        let assets = AssetProbe::all_available();
        let theme = Theme::default();

        let label = |carousel: &Carousel| {
            playback_label(&GalleryView {
                state: carousel.state(),
                len: carousel.len(),
                interval: carousel.config().interval,
                composition: None,
                thumbs: carousel.thumbnails(&assets),
                latest_log: None,
                missing_assets: 0,
                theme: &theme,
            })
        };

        assert_eq!(label(&carousel), " ▶ every 5.2s");
        carousel.select_thumbnail(2, now);
        assert_eq!(label(&carousel), " ⇄ 1 → 3");
    }
}
