// Thumbnail strip component
//
// One bordered cell per visible indicator. The active one gets a thick
// accent border; the rest are drawn at the indicator's reduced opacity.

use super::{file_name, fit_width};
use crate::carousel::{Indicator, ThumbFace, thumbnails::PLAY_GLYPH};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, slots: &[(usize, Rect)], indicators: &[Indicator], theme: &Theme) {
    for (index, rect) in slots {
        if let Some(indicator) = indicators.get(*index) {
            render_indicator(f, *rect, indicator, theme);
        }
    }
}

fn render_indicator(f: &mut Frame, rect: Rect, indicator: &Indicator, theme: &Theme) {
    let (border_type, border_color) = if indicator.border_width > 1 {
        (BorderType::Thick, theme.accent_dark)
    } else {
        (BorderType::Plain, theme.faded(theme.border, indicator.opacity))
    };

    let mut text_style = Style::default().fg(theme.faded(theme.fg, indicator.opacity));
    if indicator.active {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }
    if indicator.face == ThumbFace::Neutral {
        text_style = text_style.bg(theme.neutral_fill).fg(theme.bg);
    }

    let inner_width = rect.width.saturating_sub(2) as usize;
    let label = fit_width(&face_label(indicator), inner_width);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    f.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(text_style)
            .block(block),
        rect,
    );
}

fn face_label(indicator: &Indicator) -> String {
    let stem = match indicator.face {
        ThumbFace::Image { src } | ThumbFace::Poster { src } => {
            let name = file_name(src);
            name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
        }
        ThumbFace::Neutral => "",
    };
    match (indicator.play_glyph, stem.is_empty()) {
        (true, true) => PLAY_GLYPH.to_string(),
        (true, false) => format!("{}{}", PLAY_GLYPH, stem),
        (false, _) => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{AssetProbe, MediaItem, Playlist};
    use crate::carousel::thumbnails::indicators;

    #[test]
    fn labels_show_stem_and_play_glyph() {
        let playlist = Playlist::new(vec![
            MediaItem::image("/gallery/01.jpeg"),
            MediaItem::Video {
                src: "/gallery/clip.mp4".to_string(),
                poster: Some("/gallery/poster.png".to_string()),
            },
            MediaItem::video("/gallery/raw.mp4"),
        ]);
        let thumbs = indicators(&playlist, 0, &AssetProbe::all_available());

        assert_eq!(face_label(&thumbs[0]), "01");
        assert_eq!(face_label(&thumbs[1]), "▶poster");
        assert_eq!(face_label(&thumbs[2]), "▶");
    }
}
