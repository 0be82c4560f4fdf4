//! Media descriptors and the immutable playlist a carousel cycles through

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// A single slide: either a still image or a looping video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaItem {
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Video {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        poster: Option<String>,
    },
}

impl MediaItem {
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image {
            src: src.into(),
            alt: None,
        }
    }

    #[cfg(test)]
    pub fn video(src: impl Into<String>) -> Self {
        Self::Video {
            src: src.into(),
            poster: None,
        }
    }

    pub fn src(&self) -> &str {
        match self {
            Self::Image { src, .. } | Self::Video { src, .. } => src,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }

    /// Short type label used in logs and captions
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
        }
    }
}

/// Ordered, immutable sequence of media items
///
/// Cloning is cheap (shared slice); a carousel instance never sees the
/// playlist change underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    items: Arc<[MediaItem]>,
}

impl Playlist {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Build a playlist of plain images from a list of paths
    pub fn from_photos<I, S>(photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(photos.into_iter().map(MediaItem::image).collect())
    }

    /// Resolve the configured gallery: explicit items win, the legacy photo
    /// list is only consulted when no items are configured.
    pub fn from_sources(items: Vec<MediaItem>, photos: Vec<String>) -> Self {
        if items.is_empty() {
            Self::from_photos(photos)
        } else {
            Self::new(items)
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    /// Probe every local asset once. Remote URLs are assumed loadable.
    pub fn probe_assets(&self, root: &Path) -> AssetProbe {
        let mut missing = HashSet::new();
        for item in self.iter() {
            let poster = match item {
                MediaItem::Video { poster, .. } => poster.as_deref(),
                MediaItem::Image { .. } => None,
            };
            for src in std::iter::once(item.src()).chain(poster) {
                if !is_remote(src) && !root.join(src.trim_start_matches('/')).exists() {
                    tracing::warn!(src = %src, "Gallery asset not found, it will be hidden");
                    missing.insert(src.to_string());
                }
            }
        }
        AssetProbe { missing }
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:")
}

/// Result of the one-shot asset load check
///
/// A failed asset is hidden by the renderer. There is no retry.
#[derive(Debug, Clone, Default)]
pub struct AssetProbe {
    missing: HashSet<String>,
}

impl AssetProbe {
    /// Every asset available
    #[cfg(test)]
    pub fn all_available() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn mark_missing(&mut self, src: impl Into<String>) {
        self.missing.insert(src.into());
    }

    pub fn is_available(&self, src: &str) -> bool {
        !self.missing.contains(src)
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}
