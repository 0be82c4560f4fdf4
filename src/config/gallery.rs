//! Gallery configuration: carousel timing, input tuning, media list

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::carousel::{CarouselConfig, MediaItem, Playlist};

/// Gallery configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Time each slide is shown before autoplay advances
    pub interval: Duration,
    /// Cross-fade duration
    pub fade: Duration,
    /// Extra time after the fade before the outgoing layer is dropped
    pub fade_slack: Duration,
    /// Drag distance in pixels that counts as a swipe
    pub swipe_threshold_px: f32,
    /// Pixels per terminal column when converting mouse columns to pointer X
    pub cell_width_px: u16,
    /// Slides in order
    pub items: Vec<MediaItem>,
    /// Legacy image-only list, used when `items` is empty
    pub photos: Vec<String>,
    /// Directory local media paths resolve against
    pub asset_root: PathBuf,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let carousel = CarouselConfig::default();
        Self {
            interval: carousel.interval,
            fade: carousel.fade,
            fade_slack: carousel.fade_slack,
            swipe_threshold_px: carousel.swipe_threshold_px,
            cell_width_px: 8,
            items: vec![
                MediaItem::image("/gallery/01.jpeg"),
                MediaItem::image("/gallery/02.jpeg"),
                MediaItem::image("/gallery/03.jpeg"),
                MediaItem::Video {
                    src: "/gallery/video.mp4".to_string(),
                    poster: Some("/gallery/poster-video.png".to_string()),
                },
            ],
            photos: Vec::new(),
            asset_root: PathBuf::from("./public"),
        }
    }
}

/// Gallery settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileGallery {
    pub interval_ms: Option<u64>,
    pub fade_ms: Option<u64>,
    pub fade_slack_ms: Option<u64>,
    pub swipe_threshold_px: Option<f32>,
    pub cell_width_px: Option<u16>,
    pub items: Option<Vec<MediaItem>>,
    pub photos: Option<Vec<String>>,
    pub asset_root: Option<String>,
}

impl GalleryConfig {
    /// Create from file config with defaults
    ///
    /// A file that lists `photos` but no `items` gets exactly those photos,
    /// not the built-in demo items.
    pub fn from_file(file: Option<FileGallery>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let items = match (file.items, &file.photos) {
            (Some(items), _) => items,
            (None, Some(_)) => Vec::new(),
            (None, None) => defaults.items,
        };

        Self {
            interval: file
                .interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            fade: file.fade_ms.map(Duration::from_millis).unwrap_or(defaults.fade),
            fade_slack: file
                .fade_slack_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.fade_slack),
            // Below zero every tap would count as a swipe
            swipe_threshold_px: file
                .swipe_threshold_px
                .filter(|t| t.is_finite() && *t >= 0.0)
                .unwrap_or(defaults.swipe_threshold_px),
            cell_width_px: file
                .cell_width_px
                .filter(|w| *w > 0)
                .unwrap_or(defaults.cell_width_px),
            items,
            photos: file.photos.unwrap_or_default(),
            asset_root: file
                .asset_root
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_root),
        }
    }

    pub fn carousel_config(&self) -> CarouselConfig {
        CarouselConfig {
            interval: self.interval,
            fade: self.fade,
            fade_slack: self.fade_slack,
            swipe_threshold_px: self.swipe_threshold_px,
        }
    }

    /// The playlist this gallery cycles through
    pub fn playlist(&self) -> Playlist {
        Playlist::from_sources(self.items.clone(), self.photos.clone())
    }
}
