//! Application-wide constants and compile-time configuration.
//!
//! All screen geometry, timing parameters, and capacity bounds live
//! here so they can be tuned in one place.

// Display

/// Physical display resolution (square watch LCD).
pub const SCREEN_WIDTH: i32 = 176;
pub const SCREEN_HEIGHT: i32 = 176;

// Keyboard layout

/// Left edge of the key area (px). The strip to the left stays clear of
/// the curved bezel.
pub const KEY_AREA_X: i32 = 5;

/// Top edge of the key area (px). The typed-text strip sits above it.
pub const KEY_AREA_Y: i32 = 32;

/// Gap between adjacent keys (px).
pub const KEY_MARGIN: i32 = 3;

/// Inner padding between a key's border and its glyphs (px).
pub const KEY_PADDING: i32 = 4;

/// Width of the key's border ring (px).
pub const KEY_BORDER: i32 = 2;

/// Widest the typed-text line may render before left-truncation kicks in (px).
pub const TYPED_MAX_WIDTH: i32 = SCREEN_WIDTH - 40;

// Timing

/// Cursor blink half-period (ms) - the underscore toggles at this rate.
pub const CURSOR_BLINK_MS: u64 = 200;

/// Delay between a confirm/cancel press and session resolution (ms).
/// Lets the in-flight touch event settle before the keyboard is torn down.
pub const RESOLVE_DEBOUNCE_MS: u64 = 50;

/// Touch contact longer than this counts as a long press (ms).
pub const LONG_PRESS_MS: u64 = 500;

/// Haptic pulse on an accepted key press (ms).
pub const KEY_BUZZ_MS: u32 = 25;

/// Haptic pulse when a task nudge fires (ms).
pub const NUDGE_BUZZ_MS: u32 = 200;

// Capacity bounds

/// Longest text the keyboard will accept (chars are dropped beyond this).
pub const MAX_TYPED: usize = 128;

/// Most keys a single keyboard level can hold. The partitioner never
/// produces more than 12; the headroom is for caller-supplied sets.
pub const MAX_KEYS: usize = 32;

/// Maximum number of pending + complete tasks tracked at once.
pub const MAX_TASKS: usize = 16;

/// Maximum number of saved task templates.
pub const MAX_TEMPLATES: usize = 8;

/// Longest task title (bytes).
pub const MAX_TASK_TEXT: usize = 64;

/// Longest template name (bytes).
pub const MAX_TEMPLATE_NAME: usize = 32;

// Reminder scheduling

/// Default nudge interval for a new task (seconds).
pub const DEFAULT_TASK_INTERVAL_SECS: u32 = 30;

/// Adjustable range of the nudge interval (seconds).
pub const TASK_INTERVAL_MIN_SECS: u32 = 10;
pub const TASK_INTERVAL_MAX_SECS: u32 = 300;
pub const TASK_INTERVAL_STEP_SECS: u32 = 10;

// Settings storage

/// Maximum serialized size of the settings blob (tasks + templates).
pub const MAX_STORE_BLOB: usize = 2048;

/// Flash page index where settings storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
