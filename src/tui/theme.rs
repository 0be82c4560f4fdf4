// Gallery colour palette
//
// Terminal cells have no alpha channel, so layer opacity is applied by
// blending a foreground colour toward the background.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    /// Active indicator, title, arrows
    pub accent: Color,
    pub accent_dark: Color,
    pub muted: Color,
    pub border: Color,
    /// Fill for video indicators without a poster
    pub neutral_fill: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::sage()
    }
}

impl Theme {
    /// Light paper with sage accents
    pub fn sage() -> Self {
        Self {
            bg: Color::Rgb(0xFF, 0xFF, 0xFF),
            fg: Color::Rgb(0x1F, 0x29, 0x37),
            accent: Color::Rgb(0xAE, 0xB7, 0xA2),
            accent_dark: Color::Rgb(0x8E, 0x98, 0x7F),
            muted: Color::Rgb(0x64, 0x74, 0x8B),
            border: Color::Rgb(0xE7, 0xE7, 0xE7),
            neutral_fill: Color::Rgb(0x3A, 0x3F, 0x47),
        }
    }

    /// `fg` as seen at `opacity` over the background
    pub fn faded(&self, fg: Color, opacity: f32) -> Color {
        blend(fg, self.bg, opacity)
    }
}

/// Linear blend of `top` over `bottom`. Non-RGB colours cannot be mixed, so
/// they snap to whichever side dominates.
pub fn blend(top: Color, bottom: Color, opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    match (top, bottom) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (b as f32 + (a as f32 - b as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t >= 0.5 => top,
        _ => bottom,
    }
}
