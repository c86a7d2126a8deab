//! Layout partitioner: slice an arbitrary string into keyboard keys.
//!
//! Balances the number of keys against the characters per key so a
//! caller-supplied character set gets a sensible two-level layout
//! without hand-building one for every alphabet.

use super::{KeySpec, KeySpecVec, Special};

/// Ascending catalogue of characters-per-key candidates.
const CHARS_PER_KEY_STEPS: [i32; 6] = [1, 2, 4, 6, 9, 12];

/// Ascending catalogue of key-count candidates, before subtracting the
/// mandatory special keys.
const KEY_COUNT_STEPS: [i32; 4] = [4, 6, 9, 12];

/// Partition `text` into character keys plus the given special keys.
///
/// The search walks both catalogues until `chars_per_key * num_keys`
/// covers the text, preferring to grow chars-per-key while it trails the
/// key count or while growing it alone would still leave spare keys.
/// Catalogue indices saturate at their last entry, so partitioning never
/// fails: over-long input simply yields more chunks than the key-count
/// target. Empty text yields the specials alone.
///
/// Character keys, concatenated in order, reproduce `text` exactly;
/// specials follow in their given order.
pub fn partition<'a>(text: &'a str, specials: &[Special]) -> KeySpecVec<'a> {
    let mandatory = specials.len() as i32;
    let len = text.chars().count() as i32;

    let key_steps: [i32; 4] = [
        KEY_COUNT_STEPS[0] - mandatory,
        KEY_COUNT_STEPS[1] - mandatory,
        KEY_COUNT_STEPS[2] - mandatory,
        KEY_COUNT_STEPS[3] - mandatory,
    ];

    let mut char_idx = 0usize;
    let mut key_idx = 0usize;
    while CHARS_PER_KEY_STEPS[char_idx] * key_steps[key_idx] < len {
        let num_chars = CHARS_PER_KEY_STEPS[char_idx];
        let num_keys = key_steps[key_idx];
        let char_maxed = char_idx + 1 == CHARS_PER_KEY_STEPS.len();
        let key_maxed = key_idx + 1 == key_steps.len();

        let grow_chars = num_chars <= num_keys || len < num_chars * num_keys;
        if grow_chars && !char_maxed {
            char_idx += 1;
        } else if !key_maxed {
            key_idx += 1;
        } else if !char_maxed {
            char_idx += 1;
        } else {
            break;
        }
    }
    let chars_per_key = CHARS_PER_KEY_STEPS[char_idx] as usize;

    let mut set = KeySpecVec::new();
    for chunk in chunks(text, chars_per_key) {
        let _ = set.push(KeySpec::Chars(chunk));
    }
    for special in specials {
        let _ = set.push(KeySpec::Special(*special));
    }
    set
}

/// Iterate `text` in consecutive chunks of `count` characters (the last
/// chunk may be shorter). Chunk boundaries respect UTF-8.
fn chunks(text: &str, count: usize) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let split = rest
            .char_indices()
            .nth(count)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(split);
        rest = tail;
        Some(chunk)
    })
}
