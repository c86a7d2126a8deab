//! Keyboard session: one text-entry interaction from invocation to
//! confirm/cancel.
//!
//! All session state lives in this struct - typed text, shift/caps,
//! the active key set, and the single-settle completion cell. Event
//! handlers are plain methods; the embedded driver (or a test) feeds
//! them touch events and timer ticks.

use super::charset::partition;
use super::draw::{clear_key_area, draw_keys, draw_typed};
use super::keys::{build_keys, expand, hit_key, key_area, Key, KeyVec};
use super::{
    InputOptions, KeySpec, Special, TouchEvent, TouchKind, DEFAULT_CHAR_SETS,
    DEFAULT_CHAR_SETS_SHIFT, RAW_SPECIALS, RAW_SPECIALS_SHIFT,
};
use crate::config::{KEY_BUZZ_MS, MAX_TYPED};
use crate::gfx::Surface;
use crate::haptics::Haptics;
use heapless::String;

/// How the session ended. Cancellation is distinct from confirming an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(String<MAX_TYPED>),
    Cancelled,
}

/// Resolution stamped by a confirm/cancel press, applied one scheduling
/// turn later (after the debounce delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Confirm,
    Cancel,
}

/// Which key set touch events resolve against.
enum ActiveLevel<'a> {
    /// Top level; effective shift picks the unshifted or shifted set.
    Main,
    /// Drilled into a composite key.
    Sub(KeyVec<'a>),
}

pub struct Session<'a> {
    typed: String<MAX_TYPED>,
    shift: bool,
    caps: bool,
    main_keys: KeyVec<'a>,
    shift_keys: KeyVec<'a>,
    active: ActiveLevel<'a>,
    cursor_visible: bool,
    pending: Option<Pending>,
    settled: Option<Outcome>,
}

impl<'a> Session<'a> {
    pub fn new(options: &InputOptions<'a>) -> Self {
        let bounds = key_area();
        let main_keys = match (options.char_sets, options.chars) {
            (Some(sets), _) => build_keys(sets, bounds),
            (None, Some(raw)) => build_keys(&partition(raw, RAW_SPECIALS), bounds),
            (None, None) => build_keys(DEFAULT_CHAR_SETS, bounds),
        };
        let shift_keys = match (options.char_sets_shift, options.chars_shift) {
            (Some(sets), _) => build_keys(sets, bounds),
            (None, Some(raw)) => build_keys(&partition(raw, RAW_SPECIALS_SHIFT), bounds),
            (None, None) => build_keys(DEFAULT_CHAR_SETS_SHIFT, bounds),
        };

        let mut typed = String::new();
        for ch in options.text.chars() {
            if typed.push(ch).is_err() {
                break;
            }
        }

        Self {
            typed,
            shift: false,
            caps: false,
            main_keys,
            shift_keys,
            active: ActiveLevel::Main,
            cursor_visible: true,
            pending: None,
            settled: None,
        }
    }

    /// Clear the screen and draw the initial keyboard.
    pub fn start<S: Surface>(&mut self, surface: &mut S) {
        surface.clear();
        draw_typed(surface, &self.typed, self.cursor_visible);
        self.redraw_keys(surface);
    }

    /// Logical case state: shift while caps is latched reverts to
    /// lowercase, so the two XOR rather than OR.
    pub fn effective_shift(&self) -> bool {
        self.shift != self.caps
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn at_main_level(&self) -> bool {
        matches!(self.active, ActiveLevel::Main)
    }

    pub fn caps(&self) -> bool {
        self.caps
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    fn active_keys(&self) -> &[Key<'a>] {
        match &self.active {
            ActiveLevel::Sub(keys) => keys,
            ActiveLevel::Main => {
                if self.effective_shift() {
                    &self.shift_keys
                } else {
                    &self.main_keys
                }
            }
        }
    }

    /// Dispatch one touch event against the active key set.
    pub fn handle_touch<S, H>(&mut self, surface: &mut S, haptics: &mut H, event: TouchEvent)
    where
        S: Surface,
        H: Haptics,
    {
        if self.settled.is_some() {
            return;
        }

        let Some(key) = hit_key(self.active_keys(), event.x, event.y).copied() else {
            // Empty space is the escape gesture back to the main level.
            self.swap_to_main(surface);
            return;
        };

        haptics.buzz(KEY_BUZZ_MS);

        if key.is_composite() {
            if event.kind == TouchKind::LongPress {
                // Hold a letter row for shift.
                self.shift = !self.shift;
                self.swap_to_main(surface);
            } else {
                self.active = ActiveLevel::Sub(expand(&key, key_area()));
                self.redraw_keys(surface);
            }
            return;
        }

        match key.spec {
            KeySpec::Special(special) => self.on_special(surface, special),
            KeySpec::Chars(chars) => {
                let _ = self.typed.push_str(chars);
                self.shift = false;
                draw_typed(surface, &self.typed, false);
                self.swap_to_main(surface);
            }
        }
    }

    fn on_special<S: Surface>(&mut self, surface: &mut S, special: Special) {
        match special {
            Special::Confirm => {
                if self.pending.is_none() {
                    self.pending = Some(Pending::Confirm);
                }
            }
            Special::Cancel => {
                if self.pending.is_none() {
                    self.pending = Some(Pending::Cancel);
                }
            }
            Special::Delete => {
                self.typed.pop();
                draw_typed(surface, &self.typed, false);
            }
            Special::Shift => {
                self.shift = !self.shift;
                self.swap_to_main(surface);
            }
            Special::CapsLock => {
                self.caps = !self.caps;
                self.swap_to_main(surface);
            }
            Special::Space => {
                let _ = self.typed.push(' ');
            }
        }
    }

    fn swap_to_main<S: Surface>(&mut self, surface: &mut S) {
        self.active = ActiveLevel::Main;
        self.redraw_keys(surface);
    }

    fn redraw_keys<S: Surface>(&mut self, surface: &mut S) {
        clear_key_area(surface);
        draw_keys(surface, self.active_keys(), self.shift, self.caps);
    }

    /// Toggle the cursor and repaint the typed-text strip. Driven on a
    /// fixed interval, independent of key handling; a no-op once the
    /// session has settled.
    pub fn blink_tick<S: Surface>(&mut self, surface: &mut S) {
        if self.settled.is_some() {
            return;
        }
        self.cursor_visible = !self.cursor_visible;
        draw_typed(surface, &self.typed, self.cursor_visible);
    }

    /// True after a confirm/cancel press, until [`finish`](Self::finish)
    /// runs. The caller schedules `finish` one debounce delay later.
    pub fn pending_resolution(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the pending resolution. The first confirm/cancel press
    /// wins; anything stamped afterwards was already ignored.
    pub fn finish(&mut self) {
        match self.pending.take() {
            Some(Pending::Confirm) => {
                let text = self.typed.clone();
                self.settle(Outcome::Confirmed(text));
            }
            Some(Pending::Cancel) => self.settle(Outcome::Cancelled),
            None => {}
        }
    }

    /// Externally abort the session (caller navigates away).
    pub fn abort(&mut self) {
        self.settle(Outcome::Cancelled);
    }

    /// Settle the completion cell. At most one settle takes effect;
    /// later attempts are silent no-ops.
    fn settle(&mut self, outcome: Outcome) {
        if self.settled.is_none() {
            self.settled = Some(outcome);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.settled.as_ref()
    }
}
