// Media frame component
//
// Terminals cannot show pixels, so each layer is a centred caption card.
// Opacity is shown by fading the card's colours toward the background; the
// more visible layer is painted last and covers the other one.

use super::{file_name, fit_width};
use crate::carousel::{Layer, MediaElement};
use crate::tui::theme::Theme;
use crate::tui::ui::GalleryView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, view: &GalleryView) {
    let theme = view.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(composition) = &view.composition else {
        return;
    };

    let mut layers: Vec<&Layer> = composition.layers().collect();
    layers.sort_by(|a, b| a.visible_opacity.total_cmp(&b.visible_opacity));
    for layer in layers {
        render_layer(f, inner, layer, theme);
    }

    if inner.height > 0 && view.len > 0 {
        let caption = format!("{} / {} ", view.state.current_index() + 1, view.len);
        let row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        f.render_widget(
            Paragraph::new(caption)
                .alignment(Alignment::Right)
                .style(Style::default().fg(theme.muted)),
            row,
        );
    }
}

fn render_layer(f: &mut Frame, area: Rect, layer: &Layer, theme: &Theme) {
    let lines = card_lines(&layer.media, area.width.saturating_sub(2) as usize, theme, layer.visible_opacity);
    if lines.is_empty() {
        // Failed asset: the layer is hidden
        return;
    }

    let height = (lines.len() as u16).min(area.height);
    let card = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height) / 2,
        area.width,
        height,
    );

    f.render_widget(Clear, card);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.bg)),
        card,
    );
}

fn card_lines(media: &MediaElement, width: usize, theme: &Theme, opacity: f32) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.faded(theme.muted, opacity));
    let title = Style::default()
        .fg(theme.faded(theme.fg, opacity))
        .add_modifier(Modifier::BOLD);
    let detail = Style::default()
        .fg(theme.faded(theme.accent_dark, opacity))
        .add_modifier(Modifier::ITALIC);

    match media {
        MediaElement::Hidden => Vec::new(),
        MediaElement::Image { src, alt } => {
            let mut lines = vec![
                Line::from(Span::styled("▣ image", label)),
                Line::from(Span::styled(fit_width(file_name(src), width), title)),
            ];
            if !alt.is_empty() {
                lines.push(Line::from(Span::styled(fit_width(alt, width), detail)));
            }
            lines
        }
        MediaElement::Video {
            src,
            poster,
            playback,
        } => {
            let mut flags = vec!["▶ video"];
            if playback.muted {
                flags.push("muted");
            }
            if playback.looped {
                flags.push("loop");
            }
            let mut lines = vec![
                Line::from(Span::styled(flags.join(" · "), label)),
                Line::from(Span::styled(fit_width(file_name(src), width), title)),
            ];
            if let Some(poster) = poster {
                let text = format!("poster {}", file_name(poster));
                lines.push(Line::from(Span::styled(fit_width(&text, width), detail)));
            }
            lines
        }
    }
}
