//! Unit tests for keyboard layout and session logic.
//!
//! These run on the host and verify the pure logic of partitioning,
//! font selection, grid geometry, and the session state machine.

use super::charset::partition;
use super::draw::draw_typed;
use super::font::best_font;
use super::geometry::{cell_rect, grid_dims};
use super::keys::{build_keys, expand, hit_key, key_area};
use super::session::{Outcome, Session};
use super::{InputOptions, KeySpec, Special, TouchEvent, TouchKind};
use crate::gfx::{FontId, Rect, Surface, Theme};
use crate::haptics::Haptics;

// ═══════════════════════════════════════════════════════════════════════════
// Test doubles
// ═══════════════════════════════════════════════════════════════════════════

/// Surface fake with fixed-advance font metrics; records drawn strings.
struct TestSurface {
    theme: Theme,
    font: FontId,
    strings: Vec<String>,
}

impl TestSurface {
    fn new() -> Self {
        Self {
            theme: Theme::default(),
            font: FontId::Mono4x6,
            strings: Vec::new(),
        }
    }
}

impl Surface for TestSurface {
    fn theme(&self) -> Theme {
        self.theme
    }

    fn set_color(&mut self, _color: embedded_graphics::pixelcolor::Rgb565) {}

    fn fill_rect(&mut self, _rect: Rect) {}

    fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    fn draw_string(&mut self, text: &str, _x: i32, _y: i32) {
        self.strings.push(text.to_string());
    }

    fn string_width(&mut self, text: &str) -> i32 {
        self.font.glyph_size().0 * text.chars().count() as i32
    }
}

#[derive(Default)]
struct TestHaptics {
    buzzes: usize,
}

impl Haptics for TestHaptics {
    fn buzz(&mut self, _duration_ms: u32) {
        self.buzzes += 1;
    }
}

fn tap(x: i32, y: i32) -> TouchEvent {
    TouchEvent {
        x,
        y,
        kind: TouchKind::Tap,
    }
}

fn long_press(x: i32, y: i32) -> TouchEvent {
    TouchEvent {
        x,
        y,
        kind: TouchKind::LongPress,
    }
}

/// Center of key `i` in an n-key grid over the standard key area.
fn key_center(i: usize, count: usize) -> (i32, i32) {
    let rect = cell_rect(i, count, key_area(), crate::config::KEY_MARGIN);
    (rect.x + rect.w / 2, rect.y + rect.h / 2)
}

// ═══════════════════════════════════════════════════════════════════════════
// Partitioner
// ═══════════════════════════════════════════════════════════════════════════

/// Character keys concatenated in order must reproduce the input.
fn assert_reconstructs(text: &str, specials: &[Special]) {
    let set = partition(text, specials);
    let mut rebuilt = String::new();
    let mut seen_specials = Vec::new();
    for spec in &set {
        match spec {
            KeySpec::Chars(chunk) => {
                assert!(seen_specials.is_empty(), "specials must come last");
                rebuilt.push_str(chunk);
            }
            KeySpec::Special(sp) => seen_specials.push(*sp),
        }
    }
    assert_eq!(rebuilt, text);
    assert_eq!(seen_specials, specials);
}

#[test]
fn partition_reconstructs_input() {
    assert_reconstructs("abcdefghijklmnopqrstuvwxyz", &[Special::Confirm]);
    assert_reconstructs("abc", &[]);
    assert_reconstructs("x", &[Special::Confirm, Special::Delete]);
    assert_reconstructs(
        "abcdefghijklmnopqrstuvwxyz0123456789",
        &[Special::Confirm, Special::Delete, Special::CapsLock],
    );
}

#[test]
fn partition_alphanumeric_exact_fit() {
    // 36 chars + 3 mandatory specials: the search lands on 6 chars/key
    // x 6 keys, an exact fit, plus the specials.
    let set = partition(
        "abcdefghijklmnopqrstuvwxyz0123456789",
        &[Special::Confirm, Special::Delete, Special::CapsLock],
    );
    assert_eq!(set.len(), 9);
    let char_keys: Vec<_> = set
        .iter()
        .filter_map(|s| match s {
            KeySpec::Chars(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(char_keys.len(), 6);
    assert!(char_keys.iter().all(|c| c.chars().count() == 6));
}

#[test]
fn partition_empty_text_yields_specials_only() {
    let set = partition("", &[Special::Confirm, Special::Cancel]);
    assert_eq!(set.len(), 2);
    assert!(set
        .iter()
        .all(|s| matches!(s, KeySpec::Special(_))));
}

#[test]
fn partition_short_text_single_char_keys() {
    let set = partition("abc", &[Special::Confirm]);
    // 3 chars fit 1-per-key in the smallest grid.
    let char_keys: Vec<_> = set
        .iter()
        .filter_map(|s| match s {
            KeySpec::Chars(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(char_keys, ["a", "b", "c"]);
}

#[test]
fn partition_multibyte_chunks_respect_boundaries() {
    assert_reconstructs("àéîõü߯あいうえお", &[Special::Confirm]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Font selector
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn best_font_walks_catalogue() {
    // Single glyph in generous space prefers the vector font.
    let choice = best_font(100, 100, 0, 1, 1);
    assert!(matches!(choice.font, FontId::Vector(_)));
    assert_eq!(choice.width, 100);

    // 3x3 grid in a 54x45 key: 18x15 cells carry 6x8.
    let choice = best_font(54, 45, 0, 3, 3);
    assert_eq!(choice.font, FontId::Mono6x8);

    // Tight space falls back to the smallest font.
    let choice = best_font(10, 10, 0, 3, 3);
    assert_eq!(choice.font, FontId::Mono4x6);
}

#[test]
fn best_font_never_fails_on_degenerate_space() {
    for (w, h) in [(0, 0), (-5, 10), (3, 2)] {
        let choice = best_font(w, h, 0, 2, 2);
        assert_eq!(choice.font, FontId::Mono4x6);
    }
}

#[test]
fn best_font_fits_cell_budget() {
    for w in [20, 54, 80, 171] {
        for h in [20, 45, 80, 144] {
            for grid in [1, 2, 3, 4] {
                let choice = best_font(w, h, 0, grid, grid);
                if choice.font == FontId::Mono4x6 {
                    continue; // documented fallback may overflow
                }
                assert!(choice.width <= w / grid);
                assert!(choice.height <= h / grid);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Grid geometry
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn grid_dims_near_square() {
    assert_eq!(grid_dims(1), (1, 1));
    assert_eq!(grid_dims(4), (2, 2));
    assert_eq!(grid_dims(5), (3, 2));
    assert_eq!(grid_dims(9), (3, 3));
    assert_eq!(grid_dims(12), (4, 3));
    for count in 1..=30 {
        let (cols, rows) = grid_dims(count);
        assert!(cols * rows >= count as i32);
        assert!(rows <= cols);
    }
}

#[test]
fn cell_rects_disjoint_and_in_bounds() {
    let bounds = key_area();
    for count in 1..=16 {
        let rects: Vec<Rect> = (0..count).map(|i| cell_rect(i, count, bounds, 3)).collect();
        for (i, a) in rects.iter().enumerate() {
            assert!(a.w > 0 && a.h > 0);
            assert!(a.x >= bounds.x && a.y >= bounds.y);
            assert!(a.x + a.w <= bounds.x + bounds.w);
            assert!(a.y + a.h <= bounds.y + bounds.h);
            for b in rects.iter().skip(i + 1) {
                let overlap_x = a.x < b.x + b.w && b.x < a.x + a.w;
                let overlap_y = a.y < b.y + b.h && b.y < a.y + a.h;
                assert!(!(overlap_x && overlap_y), "rects {a:?} and {b:?} overlap");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Keys
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn build_keys_binds_every_spec() {
    let specs = [
        KeySpec::Chars("abc"),
        KeySpec::Chars("d"),
        KeySpec::Special(Special::Confirm),
    ];
    let keys = build_keys(&specs, key_area());
    assert_eq!(keys.len(), 3);
    assert!(keys[0].is_composite());
    assert!(!keys[1].is_composite());
}

#[test]
fn expand_promotes_each_char() {
    let specs = [KeySpec::Chars("wxyz")];
    let keys = build_keys(&specs, key_area());
    let subs = expand(&keys[0], key_area());
    assert_eq!(subs.len(), 4);
    let labels: Vec<_> = subs
        .iter()
        .filter_map(|k| match k.spec {
            KeySpec::Chars(c) => Some(c),
            _ => None,
        })
        .collect();
    assert_eq!(labels, ["w", "x", "y", "z"]);
    assert!(subs.iter().all(|k| !k.is_composite()));
}

#[test]
fn hit_key_edges_are_exclusive() {
    let specs = [KeySpec::Chars("a"), KeySpec::Chars("b")];
    let keys = build_keys(&specs, key_area());
    let rect = keys[0].rect;
    assert!(hit_key(&keys, rect.x, rect.y).is_none());
    assert!(hit_key(&keys, rect.x + 1, rect.y + 1).is_some());
    assert!(hit_key(&keys, 0, 0).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Session state machine
// ═══════════════════════════════════════════════════════════════════════════

const PLAIN: &[KeySpec<'static>] = &[
    KeySpec::Chars("a"),
    KeySpec::Special(Special::Delete),
    KeySpec::Special(Special::Confirm),
    KeySpec::Special(Special::Cancel),
];

fn plain_session(text: &'static str) -> Session<'static> {
    Session::new(&InputOptions {
        text,
        char_sets: Some(PLAIN),
        char_sets_shift: Some(PLAIN),
        ..Default::default()
    })
}

#[test]
fn typing_appends_and_buzzes() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = plain_session("");
    session.start(&mut surface);

    let (x, y) = key_center(0, PLAIN.len());
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    assert_eq!(session.typed(), "aa");
    assert_eq!(haptics.buzzes, 2);
}

#[test]
fn delete_removes_last_and_is_noop_on_empty() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = plain_session("hello");
    session.start(&mut surface);

    let (x, y) = key_center(1, PLAIN.len());
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    assert_eq!(session.typed(), "hell");
    for _ in 0..5 {
        session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    }
    assert_eq!(session.typed(), "");
    assert!(!session.is_settled());
}

#[test]
fn confirm_resolves_on_a_later_turn() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = plain_session("hi");
    session.start(&mut surface);

    let (x, y) = key_center(2, PLAIN.len());
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    // Not settled within the same handling turn.
    assert!(!session.is_settled());
    assert!(session.pending_resolution());

    session.finish();
    match session.outcome() {
        Some(Outcome::Confirmed(text)) => assert_eq!(text.as_str(), "hi"),
        other => panic!("expected confirmed outcome, got {other:?}"),
    }
}

#[test]
fn first_resolution_wins() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = plain_session("kept");
    session.start(&mut surface);

    let (cx, cy) = key_center(2, PLAIN.len());
    let (nx, ny) = key_center(3, PLAIN.len());
    // Confirm then cancel inside the same event batch.
    session.handle_touch(&mut surface, &mut haptics, tap(cx, cy));
    session.handle_touch(&mut surface, &mut haptics, tap(nx, ny));
    session.finish();

    match session.outcome() {
        Some(Outcome::Confirmed(text)) => assert_eq!(text.as_str(), "kept"),
        other => panic!("expected confirmed outcome, got {other:?}"),
    }

    // A late duplicate settle attempt is a silent no-op.
    session.abort();
    assert!(matches!(session.outcome(), Some(Outcome::Confirmed(_))));
}

#[test]
fn cancel_is_distinct_from_empty_confirm() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = plain_session("");
    session.start(&mut surface);

    let (x, y) = key_center(3, PLAIN.len());
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    session.finish();
    assert_eq!(session.outcome(), Some(&Outcome::Cancelled));
}

#[test]
fn touch_after_settle_is_ignored() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = plain_session("");
    session.start(&mut surface);
    session.abort();

    let (x, y) = key_center(0, PLAIN.len());
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    assert_eq!(session.typed(), "");
    assert_eq!(haptics.buzzes, 0);
}

const CASED: &[KeySpec<'static>] = &[
    KeySpec::Chars("a"),
    KeySpec::Special(Special::Shift),
    KeySpec::Special(Special::CapsLock),
    KeySpec::Special(Special::Space),
];
const CASED_SHIFT: &[KeySpec<'static>] = &[
    KeySpec::Chars("A"),
    KeySpec::Special(Special::Shift),
    KeySpec::Special(Special::CapsLock),
    KeySpec::Special(Special::Space),
];

fn cased_session() -> Session<'static> {
    Session::new(&InputOptions {
        text: "",
        char_sets: Some(CASED),
        char_sets_shift: Some(CASED_SHIFT),
        ..Default::default()
    })
}

#[test]
fn caps_latches_until_toggled_again() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = cased_session();
    session.start(&mut surface);

    let (ax, ay) = key_center(0, CASED.len());
    let (capsx, capsy) = key_center(2, CASED.len());

    session.handle_touch(&mut surface, &mut haptics, tap(capsx, capsy));
    session.handle_touch(&mut surface, &mut haptics, tap(ax, ay));
    session.handle_touch(&mut surface, &mut haptics, tap(ax, ay));
    assert_eq!(session.typed(), "AA");

    session.handle_touch(&mut surface, &mut haptics, tap(capsx, capsy));
    session.handle_touch(&mut surface, &mut haptics, tap(ax, ay));
    assert_eq!(session.typed(), "AAa");
}

#[test]
fn shift_is_one_shot() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = cased_session();
    session.start(&mut surface);

    let (ax, ay) = key_center(0, CASED.len());
    let (shiftx, shifty) = key_center(1, CASED.len());

    session.handle_touch(&mut surface, &mut haptics, tap(shiftx, shifty));
    assert!(session.effective_shift());
    session.handle_touch(&mut surface, &mut haptics, tap(ax, ay));
    session.handle_touch(&mut surface, &mut haptics, tap(ax, ay));
    assert_eq!(session.typed(), "Aa");
}

#[test]
fn shift_while_caps_reverts_to_lowercase() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = cased_session();
    session.start(&mut surface);

    let (shiftx, shifty) = key_center(1, CASED.len());
    let (capsx, capsy) = key_center(2, CASED.len());

    session.handle_touch(&mut surface, &mut haptics, tap(capsx, capsy));
    assert!(session.effective_shift());
    session.handle_touch(&mut surface, &mut haptics, tap(shiftx, shifty));
    // shift XOR caps: both on shows the lowercase set again.
    assert!(!session.effective_shift());
}

#[test]
fn space_key_types_a_space() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = cased_session();
    session.start(&mut surface);

    let (x, y) = key_center(3, CASED.len());
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    assert_eq!(session.typed(), " ");
}

#[test]
fn composite_tap_descends_and_types_from_sub_level() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = Session::new(&InputOptions::default());
    session.start(&mut surface);

    // Default layout: nine keys in a 3x3 grid; key 0 holds "abcdefghi".
    let (x0, y0) = key_center(0, 9);
    session.handle_touch(&mut surface, &mut haptics, tap(x0, y0));
    assert!(!session.at_main_level());

    // Sub-level is nine single-char keys in the same grid; key 1 is "b".
    let (x1, y1) = key_center(1, 9);
    session.handle_touch(&mut surface, &mut haptics, tap(x1, y1));
    assert_eq!(session.typed(), "b");
    assert!(session.at_main_level());
}

#[test]
fn out_of_bounds_touch_escapes_to_main_level() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = Session::new(&InputOptions::default());
    session.start(&mut surface);

    let (x0, y0) = key_center(0, 9);
    session.handle_touch(&mut surface, &mut haptics, tap(x0, y0));
    assert!(!session.at_main_level());

    // Above the key area: no key there.
    session.handle_touch(&mut surface, &mut haptics, tap(0, 0));
    assert!(session.at_main_level());
    assert_eq!(session.typed(), "");
}

#[test]
fn long_press_on_composite_toggles_shift() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = Session::new(&InputOptions::default());
    session.start(&mut surface);

    let (x0, y0) = key_center(0, 9);
    session.handle_touch(&mut surface, &mut haptics, long_press(x0, y0));
    assert!(session.at_main_level());
    assert!(session.effective_shift());

    // Typing through the shifted set clears the one-shot shift.
    let (sx, sy) = key_center(0, 9);
    session.handle_touch(&mut surface, &mut haptics, tap(sx, sy));
    let (bx, by) = key_center(1, 9);
    session.handle_touch(&mut surface, &mut haptics, tap(bx, by));
    assert_eq!(session.typed(), "B");
    assert!(!session.effective_shift());
}

#[test]
fn raw_chars_build_the_unshifted_level() {
    let mut surface = TestSurface::new();
    let mut haptics = TestHaptics::default();
    let mut session = Session::new(&InputOptions {
        text: "",
        chars: Some("0123"),
        chars_shift: Some("!@#$"),
        ..Default::default()
    });
    session.start(&mut surface);

    // "0123" partitions into "01" and "23" plus ok/del/caps: 5 keys.
    let (x, y) = key_center(0, 5);
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    assert!(!session.at_main_level());

    // Sub-level holds "0" and "1".
    let (x, y) = key_center(1, 2);
    session.handle_touch(&mut surface, &mut haptics, tap(x, y));
    assert_eq!(session.typed(), "1");
    assert!(session.at_main_level());
}

// ═══════════════════════════════════════════════════════════════════════════
// Typed-text strip
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn draw_typed_truncates_long_text_with_ellipsis() {
    let mut surface = TestSurface::new();
    // 12 px per glyph in the 12x20 font; 20 chars is far past the strip.
    draw_typed(&mut surface, "abcdefghijklmnopqrst", false);
    let line = surface.strings.last().unwrap();
    assert!(line.starts_with("..."));
    assert!(line.ends_with('t'));

    draw_typed(&mut surface, "short", true);
    assert_eq!(surface.strings.last().unwrap(), "short_");
}

#[test]
fn blink_tick_stops_after_settle() {
    let mut surface = TestSurface::new();
    let mut session = plain_session("x");
    session.start(&mut surface);

    session.blink_tick(&mut surface);
    let drawn = surface.strings.len();
    session.abort();
    session.blink_tick(&mut surface);
    assert_eq!(surface.strings.len(), drawn);
}
