//! Near-square grid layout for keys and in-key glyph grids.

use crate::gfx::Rect;

/// Grid shape for `count` items: `cols = ceil(sqrt(count))`,
/// `rows = ceil(count / cols)`. With this rule `rows <= cols` always
/// holds, so a row index never needs wrapping.
pub fn grid_dims(count: usize) -> (i32, i32) {
    let cols = ceil_sqrt(count);
    let rows = (count as i32 + cols - 1) / cols;
    (cols, rows)
}

/// Pixel rectangle of item `index` in a `count`-item grid laid out
/// row-major inside `bounds` with `margin` pixels between cells.
pub fn cell_rect(index: usize, count: usize, bounds: Rect, margin: i32) -> Rect {
    let (cols, rows) = grid_dims(count);
    let w = bounds.w / cols - margin;
    let h = bounds.h / rows - margin;
    let col = index as i32 % cols;
    let row = index as i32 / cols;
    Rect::new(
        bounds.x + col * (w + margin),
        bounds.y + row * (h + margin),
        w,
        h,
    )
}

fn ceil_sqrt(count: usize) -> i32 {
    let mut c: i32 = 1;
    while (c * c) < count as i32 {
        c += 1;
    }
    c
}
