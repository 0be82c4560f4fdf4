//! Thumbnail strip model: one indicator per slide

use super::playlist::{AssetProbe, MediaItem, Playlist};

/// Edge length of an indicator, in the host's layout units
pub const THUMB_SIZE: u16 = 42;
/// Edge length of the indicator for the slide currently shown
pub const THUMB_SIZE_ACTIVE: u16 = 46;

/// Glyph laid over video indicators
pub const PLAY_GLYPH: char = '▶';

/// What an indicator shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbFace<'a> {
    /// Cropped copy of the image itself
    Image { src: &'a str },
    /// Video poster frame
    Poster { src: &'a str },
    /// Video without a usable poster
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator<'a> {
    pub index: usize,
    pub face: ThumbFace<'a>,
    /// Play glyph overlay (video items)
    pub play_glyph: bool,
    pub active: bool,
    pub size: u16,
    pub border_width: u8,
    pub opacity: f32,
}

/// Build the indicators for the strip
pub fn indicators<'a>(playlist: &'a Playlist, current: usize, assets: &AssetProbe) -> Vec<Indicator<'a>> {
    playlist
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let active = index == current;
            let face = match item {
                MediaItem::Image { src, .. } => ThumbFace::Image { src },
                MediaItem::Video { poster, .. } => match poster.as_deref() {
                    Some(src) if assets.is_available(src) => ThumbFace::Poster { src },
                    _ => ThumbFace::Neutral,
                },
            };
            Indicator {
                index,
                face,
                play_glyph: item.is_video(),
                active,
                size: if active { THUMB_SIZE_ACTIVE } else { THUMB_SIZE },
                border_width: if active { 2 } else { 1 },
                opacity: if active { 1.0 } else { 0.8 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_indicator_per_item_with_active_emphasis() {
        let playlist = Playlist::new(vec![
            MediaItem::image("/a.jpg"),
            MediaItem::Video {
                src: "/b.mp4".to_string(),
                poster: Some("/b.jpg".to_string()),
            },
            MediaItem::video("/c.mp4"),
        ]);
        let strip = indicators(&playlist, 1, &AssetProbe::all_available());

        assert_eq!(strip.len(), 3);
        assert_eq!(strip[0].face, ThumbFace::Image { src: "/a.jpg" });
        assert!(!strip[0].play_glyph);

        assert_eq!(strip[1].face, ThumbFace::Poster { src: "/b.jpg" });
        assert!(strip[1].play_glyph);
        assert!(strip[1].active);
        assert_eq!(strip[1].size, THUMB_SIZE_ACTIVE);
        assert_eq!(strip[1].border_width, 2);

        assert_eq!(strip[2].face, ThumbFace::Neutral);
        assert_eq!(strip[2].size, THUMB_SIZE);
        assert_eq!(strip.iter().filter(|i| i.active).count(), 1);
    }

    #[test]
    fn test_missing_poster_falls_back_to_neutral() {
        let playlist = Playlist::new(vec![MediaItem::Video {
            src: "/v.mp4".to_string(),
            poster: Some("/gone.jpg".to_string()),
        }]);
        let mut assets = AssetProbe::all_available();
        assets.mark_missing("/gone.jpg");
        assert_eq!(indicators(&playlist, 0, &assets)[0].face, ThumbFace::Neutral);
    }
}
