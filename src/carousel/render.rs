//! Cross-fade composition
//!
//! A pure function of carousel state + playlist: which layers exist, what
//! opacity each one is heading to, whether that change is animated, and the
//! opacity actually visible at a given instant. Hosts only paint what
//! [`compose`] returns.

use super::playlist::{AssetProbe, MediaItem, Playlist};
use super::state::{CarouselState, Phase};
use std::time::Duration;
use tokio::time::Instant;

/// Which side of the cross-fade a layer is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Outgoing,
    Incoming,
}

/// How a media item is presented inside a layer
#[derive(Debug, Clone, PartialEq)]
pub enum MediaElement<'a> {
    /// Drawn at its natural aspect ratio
    Image { src: &'a str, alt: &'a str },
    /// Muted looping video without controls; clicks never reach it
    Video {
        src: &'a str,
        poster: Option<&'a str>,
        playback: VideoPlayback,
    },
    /// Asset failed to load, nothing is drawn
    Hidden,
}

/// Fixed playback attributes for slide videos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPlayback {
    pub autoplay: bool,
    pub muted: bool,
    pub looped: bool,
    pub interactive: bool,
}

impl VideoPlayback {
    pub const SLIDE: Self = Self {
        autoplay: true,
        muted: true,
        looped: true,
        interactive: false,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer<'a> {
    pub role: LayerRole,
    pub index: usize,
    pub item: &'a MediaItem,
    pub media: MediaElement<'a>,
    /// Opacity the layer is heading to
    pub opacity: f32,
    /// Animation applied to opacity changes, if any
    pub transition: Option<Duration>,
    /// Opacity visible right now (eased along the transition)
    pub visible_opacity: f32,
}

/// The layers to paint, bottom to top
#[derive(Debug, Clone, PartialEq)]
pub struct Composition<'a> {
    pub outgoing: Option<Layer<'a>>,
    pub incoming: Layer<'a>,
}

impl<'a> Composition<'a> {
    pub fn layers(&self) -> impl Iterator<Item = &Layer<'a>> {
        self.outgoing.iter().chain(std::iter::once(&self.incoming))
    }
}

/// Compose the visible layers. `None` for an empty playlist.
pub fn compose<'a>(
    state: &CarouselState,
    playlist: &'a Playlist,
    assets: &AssetProbe,
    fade: Duration,
    now: Instant,
) -> Option<Composition<'a>> {
    let current = playlist.get(state.current_index())?;
    let eased = ease_in_out(state.fade_progress(now, fade));

    let (outgoing, incoming) = match state.phase() {
        Phase::Settled => {
            let incoming = layer(
                LayerRole::Incoming,
                state.current_index(),
                current,
                assets,
                1.0,
                None,
                1.0,
            );
            (None, incoming)
        }
        Phase::Setup { previous } | Phase::Fading { previous, .. } => {
            let fading = state.is_fading();
            let outgoing = playlist.get(previous).map(|item| {
                layer(
                    LayerRole::Outgoing,
                    previous,
                    item,
                    assets,
                    if fading { 0.0 } else { 1.0 },
                    Some(fade),
                    1.0 - eased,
                )
            });
            let incoming = layer(
                LayerRole::Incoming,
                state.current_index(),
                current,
                assets,
                if fading { 1.0 } else { 0.0 },
                Some(fade),
                eased,
            );
            (outgoing, incoming)
        }
    };

    Some(Composition { outgoing, incoming })
}

fn layer<'a>(
    role: LayerRole,
    index: usize,
    item: &'a MediaItem,
    assets: &AssetProbe,
    opacity: f32,
    transition: Option<Duration>,
    visible_opacity: f32,
) -> Layer<'a> {
    Layer {
        role,
        index,
        item,
        media: media_element(item, assets),
        opacity,
        transition,
        visible_opacity,
    }
}

fn media_element<'a>(item: &'a MediaItem, assets: &AssetProbe) -> MediaElement<'a> {
    if !assets.is_available(item.src()) {
        return MediaElement::Hidden;
    }
    match item {
        MediaItem::Image { src, alt } => MediaElement::Image {
            src,
            alt: alt.as_deref().unwrap_or(""),
        },
        MediaItem::Video { src, poster } => MediaElement::Video {
            src,
            poster: poster.as_deref().filter(|p| assets.is_available(p)),
            playback: VideoPlayback::SLIDE,
        },
    }
}

/// Cubic ease-in-out over `[0, 1]`
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
