//! Font selection for key glyph grids.

use crate::gfx::FontId;

/// A selected font plus the glyph box the layout math should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontChoice {
    pub width: i32,
    pub height: i32,
    pub font: FontId,
}

/// Pick the largest catalogue font whose glyph box fits a
/// `grid_w` × `grid_h` grid of characters inside `width` × `height`
/// pixels with `padding` pixels between characters.
///
/// Total function: when nothing fits (including zero or negative space)
/// it falls back to the smallest font and lets the caller live with the
/// crowding. Cells of at least 20×20 px get the scalable vector font,
/// sized to the smaller cell dimension.
pub fn best_font(width: i32, height: i32, padding: i32, grid_w: i32, grid_h: i32) -> FontChoice {
    let cell_w = width / grid_w - padding * grid_w;
    let cell_h = height / grid_h - padding * grid_h;

    let mut choice = FontChoice {
        width: 4,
        height: 6,
        font: FontId::Mono4x6,
    };
    if cell_w >= 6 && cell_h >= 8 {
        choice = FontChoice {
            width: 6,
            height: 8,
            font: FontId::Mono6x8,
        };
    }
    if cell_w >= 12 && cell_h >= 16 {
        choice = FontChoice {
            width: 12,
            height: 16,
            font: FontId::Mono12x16,
        };
    }
    if cell_w >= 12 && cell_h >= 20 {
        choice = FontChoice {
            width: 12,
            height: 20,
            font: FontId::Mono12x20,
        };
    }
    if cell_w >= 20 && cell_h >= 20 {
        let size = cell_w.min(cell_h);
        choice = FontChoice {
            width: size,
            height: size,
            font: FontId::Vector(size as u16),
        };
    }
    choice
}
