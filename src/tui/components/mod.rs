// Components module - gallery building blocks
//
// Each component renders one region of the gallery screen:
// - Title bar: app name and version
// - Media frame: the cross-faded slide layers and position caption
// - Arrows: previous/next buttons over the frame edges
// - Thumbnail strip: one indicator per slide
// - Status bar: playback state, latest log line, key hints

pub mod arrows;
pub mod media_frame;
pub mod status_bar;
pub mod thumbnail_strip;
pub mod title_bar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to `max` display columns, marking the cut with an ellipsis
pub fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Last path segment of a media source
pub fn file_name(src: &str) -> &str {
    src.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or(src)
}
