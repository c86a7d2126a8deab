//! kbslide - on-screen sliding keyboard and focus-reminder apps for
//! nRF52840-based smartwatches.
//!
//! All layout and session logic is pure and tests on the host:
//! `cargo test` needs no hardware. The embedded binary (`main.rs`,
//! feature `embedded`) wires the same logic to the watch LCD, touch
//! controller, vibration motor, and flash.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod gfx;
pub mod haptics;
pub mod kb;
pub mod remindr;
