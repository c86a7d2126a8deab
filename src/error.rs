//! Unified error type for kbslide.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// The LCD transaction failed.
    Display,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    /// The settings blob could not be encoded or decoded.
    Codec,

    // Generic
    /// A bounded collection ran out of room.
    CapacityExceeded,

    /// Lookup by id found nothing.
    NotFound,
}
