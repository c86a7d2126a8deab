//! Keyboard rendering: key pads, glyph grids, the typed-text strip.

use super::font::best_font;
use super::geometry::grid_dims;
use super::keys::{key_area, Key};
use super::{KeySpec, Special};
use crate::config::{MAX_TYPED, TYPED_MAX_WIDTH};
use crate::gfx::{FontId, Rect, Surface, CANCEL_COLOR, CONFIRM_COLOR};
use heapless::String;

/// The strip above the key area showing the text typed so far.
const TYPED_STRIP: Rect = Rect::new(5, 5, 167, 26);

/// Where the typed text is anchored inside the strip.
const TYPED_TEXT_X: i32 = 15;
const TYPED_TEXT_Y: i32 = 10;

/// Paint one key: border ring, background pad, then its glyphs.
///
/// Shift and caps state pick the highlight background for their latched
/// keys; confirm and cancel carry their accent colors.
pub fn draw_key<S: Surface>(surface: &mut S, key: &Key<'_>, shift: bool, caps: bool) {
    let theme = surface.theme();
    let bg = match key.spec {
        KeySpec::Special(Special::Confirm) => CONFIRM_COLOR,
        KeySpec::Special(Special::Cancel) => CANCEL_COLOR,
        KeySpec::Special(Special::Delete) | KeySpec::Special(Special::Space) => theme.bg2,
        KeySpec::Special(Special::Shift) => {
            if shift {
                theme.bg_highlight
            } else {
                theme.bg2
            }
        }
        KeySpec::Special(Special::CapsLock) => {
            if caps {
                theme.bg_highlight
            } else {
                theme.bg2
            }
        }
        KeySpec::Chars(_) => theme.bg,
    };

    surface.set_color(theme.fg);
    surface.fill_rect(key.rect);
    surface.set_color(bg);
    surface.fill_rect(key.rect.inset(key.border));

    draw_chars(surface, key);
}

pub fn draw_keys<S: Surface>(surface: &mut S, keys: &[Key<'_>], shift: bool, caps: bool) {
    for key in keys {
        draw_key(surface, key, shift, caps);
    }
}

/// Lay the key's characters out in their own near-square grid, centered
/// in the key face. Special keys get their label centered instead.
fn draw_chars<S: Surface>(surface: &mut S, key: &Key<'_>) {
    let theme = surface.theme();
    let rect = key.rect;

    let chars = match key.spec {
        KeySpec::Special(special) => {
            let label = special.label();
            surface.set_color(theme.fg);
            surface.set_font(FontId::Mono12x20);
            let label_w = surface.string_width(label);
            surface.draw_string(
                label,
                rect.x + rect.w / 2 - label_w / 2,
                rect.y + rect.h / 2 - 10,
            );
            return;
        }
        KeySpec::Chars(s) => s,
    };

    let count = chars.chars().count();
    if count == 0 {
        return;
    }
    let (grid_w, grid_h) = grid_dims(count);
    let pad = key.pad;
    let best = best_font(rect.w - pad, rect.h - pad, 0, grid_w, grid_h);

    // Center the glyph block: the grid occupies the cell origins plus
    // one glyph box, the remainder splits evenly on both sides.
    let total_w = (grid_w - 1) * (rect.w / grid_w) + pad + best.width + 1;
    let total_h = (grid_h - 1) * (rect.h / grid_h) + pad + best.height + 1;
    let extra_pad_h = (rect.w - total_w) / 2;
    let extra_pad_v = (rect.h - total_h) / 2;

    surface.set_color(theme.fg);
    surface.set_font(best.font);
    let mut glyph = [0u8; 4];
    for (i, ch) in chars.chars().enumerate() {
        let gx = i as i32 % grid_w;
        let gy = i as i32 / grid_w;
        let pos_x = rect.x + pad + gx * (rect.w / grid_w) + extra_pad_h;
        let pos_y = rect.y + pad + gy * (rect.h / grid_h) + extra_pad_v;
        surface.draw_string(ch.encode_utf8(&mut glyph), pos_x, pos_y);
    }
}

/// Redraw the typed-text strip. Text wider than the strip is
/// left-truncated behind a `...` prefix; `cursor` appends the blink
/// underscore.
pub fn draw_typed<S: Surface>(surface: &mut S, text: &str, cursor: bool) {
    let theme = surface.theme();
    surface.set_font(FontId::Mono12x20);

    let mut visible = text;
    let mut ellipsis = false;
    while surface.string_width(visible) > TYPED_MAX_WIDTH {
        let mut chars = visible.char_indices();
        chars.next();
        match chars.next() {
            Some((idx, _)) => visible = &visible[idx..],
            None => {
                visible = "";
                break;
            }
        }
        ellipsis = true;
    }

    let mut line: String<{ MAX_TYPED + 4 }> = String::new();
    if ellipsis {
        let _ = line.push_str("...");
    }
    let _ = line.push_str(visible);
    if cursor {
        let _ = line.push('_');
    }

    surface.set_color(theme.bg2);
    surface.fill_rect(TYPED_STRIP);
    surface.set_color(theme.fg2);
    surface.draw_string(&line, TYPED_TEXT_X, TYPED_TEXT_Y);
}

/// Clear the key area (not the typed-text strip).
pub fn clear_key_area<S: Surface>(surface: &mut S) {
    let theme = surface.theme();
    surface.set_color(theme.bg);
    surface.fill_rect(key_area());
}
