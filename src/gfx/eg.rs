//! `embedded-graphics` implementation of the [`Surface`] contract.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_4X6, FONT_6X9, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use super::{FontId, Rect, Surface, Theme};

/// Adapter rendering [`Surface`] calls onto any `DrawTarget`.
///
/// The fixed font catalogue maps to the nearest `mono_font` faces; the
/// scalable vector entry falls back to the tallest face that fits, since
/// embedded-graphics ships no outline fonts.
pub struct EgSurface<D> {
    target: D,
    theme: Theme,
    color: Rgb565,
    font: FontId,
}

impl<D> EgSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D, theme: Theme) -> Self {
        let color = theme.fg;
        Self {
            target,
            theme,
            color,
            font: FontId::Mono4x6,
        }
    }

    /// Access the wrapped draw target (for flushing, inspection in tests).
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_target(self) -> D {
        self.target
    }

    fn face(&self) -> &'static MonoFont<'static> {
        match self.font {
            FontId::Mono4x6 => &FONT_4X6,
            FontId::Mono6x8 => &FONT_6X9,
            FontId::Mono12x16 => &FONT_9X15,
            FontId::Mono12x20 => &FONT_10X20,
            FontId::Vector(size) => {
                // Tallest face not exceeding the requested height.
                let size = size as u32;
                if size >= FONT_10X20.character_size.height {
                    &FONT_10X20
                } else if size >= FONT_9X15.character_size.height {
                    &FONT_9X15
                } else if size >= FONT_6X9.character_size.height {
                    &FONT_6X9
                } else {
                    &FONT_4X6
                }
            }
        }
    }
}

impl<D> Surface for EgSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn theme(&self) -> Theme {
        self.theme
    }

    fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let _ = Rectangle::new(
            Point::new(rect.x, rect.y),
            Size::new(rect.w as u32, rect.h as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(self.color))
        .draw(&mut self.target);
    }

    fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        let style = MonoTextStyle::new(self.face(), self.color);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target);
    }

    fn string_width(&mut self, text: &str) -> i32 {
        let face = self.face();
        let advance = face.character_size.width + face.character_spacing;
        (text.chars().count() as u32 * advance) as i32
    }
}
