//! Drawing-surface contract consumed by the UI code.
//!
//! The keyboard and reminder screens never talk to a display driver
//! directly; they draw through the [`Surface`] trait so the same logic
//! runs against the watch LCD, a simulator, or a test fake.
//!
//! [`eg::EgSurface`] adapts any `embedded_graphics::DrawTarget` to this
//! trait.

pub mod eg;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{RgbColor, WebColors};

/// Integer pixel rectangle (x/y is the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink the rectangle by `d` pixels on every side.
    pub const fn inset(&self, d: i32) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            w: self.w - 2 * d,
            h: self.h - 2 * d,
        }
    }

    /// Hit test matching the touch handling rules: the left/top edge is
    /// exclusive, so a press exactly on the border between two keys
    /// resolves to at most one of them.
    pub fn hit(&self, x: i32, y: i32) -> bool {
        let rel_x = x - self.x;
        let rel_y = y - self.y;
        rel_x > 0 && rel_x < self.w && rel_y > 0 && rel_y < self.h
    }
}

/// Font handle understood by [`Surface::set_font`].
///
/// The fixed entries carry the glyph box the layout math assumes; the
/// vector entry is sized at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    Mono4x6,
    Mono6x8,
    Mono12x16,
    Mono12x20,
    /// Scalable font at the given pixel height.
    Vector(u16),
}

impl FontId {
    /// Nominal glyph box (width, height) in pixels.
    pub const fn glyph_size(&self) -> (i32, i32) {
        match self {
            FontId::Mono4x6 => (4, 6),
            FontId::Mono6x8 => (6, 8),
            FontId::Mono12x16 => (12, 16),
            FontId::Mono12x20 => (12, 20),
            FontId::Vector(size) => (*size as i32, *size as i32),
        }
    }
}

/// Theme colors shared by all screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground (text, key borders).
    pub fg: Rgb565,
    /// Primary background.
    pub bg: Rgb565,
    /// Foreground of the typed-text strip.
    pub fg2: Rgb565,
    /// Secondary background (typed-text strip, utility keys).
    pub bg2: Rgb565,
    /// Highlight background (latched shift/caps keys).
    pub bg_highlight: Rgb565,
}

impl Default for Theme {
    /// Dark watch theme.
    fn default() -> Self {
        Self {
            fg: Rgb565::WHITE,
            bg: Rgb565::BLACK,
            fg2: Rgb565::WHITE,
            bg2: Rgb565::CSS_DARK_SLATE_GRAY,
            bg_highlight: Rgb565::new(0, 8, 31),
        }
    }
}

/// Accent color of the confirm key.
pub const CONFIRM_COLOR: Rgb565 = Rgb565::GREEN;

/// Accent color of the cancel key.
pub const CANCEL_COLOR: Rgb565 = Rgb565::RED;

/// The drawing primitives the UI code consumes.
///
/// Mirrors the small subset of a watch graphics library the apps need:
/// a current color, a current font, filled rectangles, and top-left
/// anchored strings.
pub trait Surface {
    fn theme(&self) -> Theme;

    fn set_color(&mut self, color: Rgb565);

    fn fill_rect(&mut self, rect: Rect);

    fn set_font(&mut self, font: FontId);

    /// Draw `text` with its top-left corner at (x, y) in the current
    /// font and color.
    fn draw_string(&mut self, text: &str, x: i32, y: i32);

    /// Rendered width of `text` in the current font (px).
    fn string_width(&mut self, text: &str) -> i32;

    /// Make everything drawn so far visible. Buffered backends push the
    /// framebuffer to the panel here; direct backends need nothing.
    fn present(&mut self) {}

    /// Fill the whole screen with the theme background.
    fn clear(&mut self) {
        let bg = self.theme().bg;
        self.set_color(bg);
        self.fill_rect(Rect::new(
            0,
            0,
            crate::config::SCREEN_WIDTH,
            crate::config::SCREEN_HEIGHT,
        ));
    }
}
