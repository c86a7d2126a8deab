//! Materialized keys: specs bound to screen rectangles.

use super::geometry::cell_rect;
use super::{KeySpec, KeySpecVec};
use crate::config::{
    KEY_AREA_X, KEY_AREA_Y, KEY_BORDER, KEY_MARGIN, KEY_PADDING, MAX_KEYS, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
use crate::gfx::Rect;
use heapless::Vec;

/// A key spec bound to its on-screen rectangle. Keys are derived data,
/// rebuilt whenever the owning key set or bounds change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Key<'a> {
    pub spec: KeySpec<'a>,
    pub rect: Rect,
    /// Border ring width inside `rect`.
    pub border: i32,
    /// Padding between the border and the glyphs.
    pub pad: i32,
}

impl<'a> Key<'a> {
    pub fn is_composite(&self) -> bool {
        self.spec.is_composite()
    }
}

pub type KeyVec<'a> = Vec<Key<'a>, MAX_KEYS>;

/// The screen region the keyboard occupies, below the typed-text strip.
pub const fn key_area() -> Rect {
    Rect::new(
        KEY_AREA_X,
        KEY_AREA_Y,
        SCREEN_WIDTH - KEY_AREA_X,
        SCREEN_HEIGHT - KEY_AREA_Y,
    )
}

/// Bind each spec to its grid rectangle inside `bounds`.
pub fn build_keys<'a>(specs: &[KeySpec<'a>], bounds: Rect) -> KeyVec<'a> {
    let mut keys = KeyVec::new();
    for (i, spec) in specs.iter().enumerate() {
        let _ = keys.push(Key {
            spec: *spec,
            rect: cell_rect(i, specs.len(), bounds, KEY_MARGIN),
            border: KEY_BORDER,
            pad: KEY_PADDING,
        });
    }
    keys
}

/// Expand a composite key into its sub-level: every character promoted
/// to a single-character key, laid out over the full key area.
///
/// Computed on descent; the session keeps only the active sub-level, so
/// there is no cached key tree to invalidate.
pub fn expand<'a>(parent: &Key<'a>, bounds: Rect) -> KeyVec<'a> {
    let chars = match parent.spec {
        KeySpec::Chars(s) => s,
        KeySpec::Special(_) => return KeyVec::new(),
    };
    let mut specs = KeySpecVec::new();
    let mut iter = chars.char_indices().peekable();
    while let Some((start, _)) = iter.next() {
        let end = iter.peek().map(|(idx, _)| *idx).unwrap_or(chars.len());
        let _ = specs.push(KeySpec::Chars(&chars[start..end]));
    }
    build_keys(&specs, bounds)
}

/// Find the key under a touch, if any. Events always resolve against
/// the active key set only.
pub fn hit_key<'k, 'a>(keys: &'k [Key<'a>], x: i32, y: i32) -> Option<&'k Key<'a>> {
    keys.iter().find(|key| key.rect.hit(x, y))
}
