//! On-screen sliding keyboard widget.
//!
//! A keyboard level is an ordered list of [`KeySpec`]s laid out in a
//! near-square grid. A spec holding several characters is a *composite*
//! key: tapping it slides into a sub-level where each character gets its
//! own key. Special keys (confirm, cancel, delete, shift, space, caps)
//! are part of the same list.
//!
//! ## Components
//!
//! - **charset**: partitions a raw string into key specs
//! - **font**: picks the largest font that fits a glyph grid
//! - **geometry**: assigns pixel rectangles to keys
//! - **keys**: binds specs to rectangles, expands composites
//! - **session**: the interactive state machine
//! - **draw**: rendering through the [`Surface`](crate::gfx::Surface) trait

pub mod charset;
pub mod draw;
pub mod font;
pub mod geometry;
pub mod keys;
pub mod session;

#[cfg(feature = "embedded")]
pub mod driver;

#[cfg(test)]
mod tests;

use crate::config::{LONG_PRESS_MS, MAX_KEYS};
use heapless::Vec;

/// Action keys that do not type a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Special {
    /// Resolve the session with the typed text.
    Confirm,
    /// Resolve the session with no text.
    Cancel,
    /// Remove the last typed character.
    Delete,
    /// One-shot case toggle, cleared by the next character.
    Shift,
    /// Type a single space.
    Space,
    /// Latched case toggle.
    CapsLock,
}

impl Special {
    /// Text drawn on the key face.
    pub const fn label(&self) -> &'static str {
        match self {
            Special::Confirm => "ok",
            Special::Cancel => "cncl",
            Special::Delete => "del",
            Special::Shift => "shft",
            Special::Space => "spc",
            Special::CapsLock => "caps",
        }
    }
}

/// One logical button before screen-position assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySpec<'a> {
    /// One or more characters rendered together. More than one character
    /// makes the key composite.
    Chars(&'a str),
    Special(Special),
}

impl<'a> KeySpec<'a> {
    pub fn char_count(&self) -> usize {
        match self {
            KeySpec::Chars(s) => s.chars().count(),
            KeySpec::Special(_) => 0,
        }
    }

    /// A composite key opens a sub-level instead of typing.
    pub fn is_composite(&self) -> bool {
        self.char_count() > 1
    }
}

/// An ordered list of key specs for one keyboard level.
pub type KeySpecVec<'a> = Vec<KeySpec<'a>, MAX_KEYS>;

/// Caller-supplied keyboard configuration.
///
/// Precedence per alphabet: explicit `char_sets*` beat the raw `chars*`
/// shorthand, which beats the built-in alphanumeric default.
#[derive(Default, Clone, Copy)]
pub struct InputOptions<'a> {
    /// Initial text to edit.
    pub text: &'a str,
    /// Explicit key specs for the unshifted level.
    pub char_sets: Option<&'a [KeySpec<'a>]>,
    /// Explicit key specs shown while effective shift is on.
    pub char_sets_shift: Option<&'a [KeySpec<'a>]>,
    /// Raw string to partition into the unshifted level.
    pub chars: Option<&'a str>,
    /// Raw string to partition into the shifted level.
    pub chars_shift: Option<&'a str>,
}

use KeySpec::{Chars, Special as Sp};

/// Built-in unshifted alphabet: six character rows plus utility keys.
pub const DEFAULT_CHAR_SETS: &[KeySpec<'static>] = &[
    Chars("abcdefghi"),
    Chars("jklmnopqr"),
    Chars("stuvwxyz0"),
    Chars("123456789"),
    Chars(" `-=[]\\;'"),
    Chars(",./"),
    Sp(Special::Confirm),
    Sp(Special::CapsLock),
    Sp(Special::Delete),
];

/// Built-in shifted alphabet, mirroring [`DEFAULT_CHAR_SETS`].
pub const DEFAULT_CHAR_SETS_SHIFT: &[KeySpec<'static>] = &[
    Chars("ABCDEFGHI"),
    Chars("JKLMNOPQR"),
    Chars("STUVWXYZ)"),
    Chars("!@#$%^&*("),
    Chars("~_+{}|:\"<"),
    Chars(">?"),
    Sp(Special::Confirm),
    Sp(Special::CapsLock),
    Sp(Special::Delete),
];

/// Specials appended when partitioning the raw `chars` shorthand.
pub const RAW_SPECIALS: &[Special] = &[Special::Confirm, Special::Delete, Special::CapsLock];

/// Specials appended when partitioning the raw `chars_shift` shorthand.
pub const RAW_SPECIALS_SHIFT: &[Special] = &[Special::Cancel, Special::Delete, Special::CapsLock];

/// Press duration classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchKind {
    Tap,
    LongPress,
}

impl TouchKind {
    pub fn from_duration_ms(ms: u64) -> Self {
        if ms >= LONG_PRESS_MS {
            TouchKind::LongPress
        } else {
            TouchKind::Tap
        }
    }
}

/// One discrete touch event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub x: i32,
    pub y: i32,
    pub kind: TouchKind,
}
