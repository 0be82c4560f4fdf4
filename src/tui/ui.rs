// Gallery screen drawing
//
// One call paints a whole frame from a `GalleryView` snapshot and returns the
// layout it used, which the host keeps for hit testing.

use super::components::{arrows, media_frame, status_bar, thumbnail_strip, title_bar};
use super::layout::GalleryLayout;
use super::theme::Theme;
use crate::carousel::{CarouselState, Composition, Indicator};
use crate::logging::LogEntry;
use ratatui::{style::Style, widgets::Block, Frame};
use std::time::Duration;

/// Everything a frame needs, captured at one instant
pub struct GalleryView<'a> {
    pub state: &'a CarouselState,
    pub len: usize,
    pub interval: Duration,
    pub composition: Option<Composition<'a>>,
    pub thumbs: Vec<Indicator<'a>>,
    pub latest_log: Option<LogEntry>,
    /// Local assets that failed the load check
    pub missing_assets: usize,
    pub theme: &'a Theme,
}

pub fn draw(f: &mut Frame, view: &GalleryView) -> GalleryLayout {
    let layout = GalleryLayout::compute(f.area(), view.len, view.state.current_index());

    f.render_widget(
        Block::default().style(Style::default().bg(view.theme.bg).fg(view.theme.fg)),
        f.area(),
    );

    title_bar::render(f, layout.title, view);
    media_frame::render(f, layout.frame, view);
    arrows::render(f, &layout, view.theme);
    thumbnail_strip::render(f, &layout.thumbs, &view.thumbs, view.theme);
    status_bar::render(f, layout.status, view);

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{AssetProbe, Carousel, CarouselConfig, MediaItem, Playlist};
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::time::Instant;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_current_slide_and_strip() {
        let now = Instant::now();
        let playlist = Playlist::new(vec![
            MediaItem::image("/gallery/01.jpeg"),
            MediaItem::Video {
                src: "/gallery/clip.mp4".to_string(),
                poster: None,
            },
        ]);
        let carousel = Carousel::mount(playlist, CarouselConfig::default(), now);
        let assets = AssetProbe::all_available();
        let theme = Theme::default();

        let view = GalleryView {
            state: carousel.state(),
            len: carousel.len(),
            interval: carousel.config().interval,
            composition: carousel.compose(&assets, now),
            thumbs: carousel.thumbnails(&assets),
            latest_log: None,
            missing_assets: 0,
            theme: &theme,
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = GalleryLayout::default();
        terminal.draw(|f| layout = draw(f, &view)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("01.jpeg"));
        assert!(text.contains("1 / 2"));
        assert!(text.contains('▶'));
        assert_eq!(layout.thumbs.len(), 2);
    }

    #[test]
    fn empty_playlist_renders_placeholder_only() {
        let now = Instant::now();
        let carousel = Carousel::mount(Playlist::default(), CarouselConfig::default(), now);
        let assets = AssetProbe::all_available();
        let theme = Theme::default();
        let view = GalleryView {
            state: carousel.state(),
            len: 0,
            interval: carousel.config().interval,
            composition: carousel.compose(&assets, now),
            thumbs: carousel.thumbnails(&assets),
            latest_log: None,
            missing_assets: 0,
            theme: &theme,
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut layout = GalleryLayout::default();
        terminal.draw(|f| layout = draw(f, &view)).unwrap();

        assert!(layout.thumbs.is_empty());
        assert!(layout.prev_arrow.is_none());
        assert!(!screen_text(&terminal).contains(" / "));
    }
}
