//! Task model and nudge backoff.
//!
//! A task nudges the wearer on an interval that backs off while they
//! stay on task and tightens again when they report distraction or stop
//! responding.

use crate::config::{DEFAULT_TASK_INTERVAL_SECS, MAX_TASK_TEXT};
use heapless::String;
use serde::{Deserialize, Serialize};

/// Backoff multipliers in tenths, indexed by `reminder_index`.
/// 0.5x, 1x, 2x, 3x, 6x, 10x of the base interval.
pub const BACKOFF_SCALE_TENTHS: [u32; 6] = [5, 10, 20, 30, 60, 100];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub text: String<MAX_TASK_TEXT>,
    /// Base nudge interval (seconds).
    pub base_interval_secs: u32,
    /// Position in [`BACKOFF_SCALE_TENTHS`].
    pub reminder_index: u8,
    /// Whether the backoff scale applies at all.
    pub incremental_backoff: bool,
    pub distract_count: u32,
    pub on_task_count: u32,
    pub unresponsive_count: u32,
    pub complete: bool,
}

impl Task {
    pub fn new(id: u32, text: &str) -> Self {
        let mut title = String::new();
        for ch in text.chars() {
            if title.push(ch).is_err() {
                break;
            }
        }
        Self {
            id,
            text: title,
            base_interval_secs: DEFAULT_TASK_INTERVAL_SECS,
            reminder_index: 1,
            incremental_backoff: true,
            distract_count: 0,
            on_task_count: 0,
            unresponsive_count: 0,
            complete: false,
        }
    }

    /// Delay until the next are-you-on-task nudge (ms).
    pub fn next_nudge_delay_ms(&self) -> u64 {
        let base = self.base_interval_secs as u64 * 1000;
        if self.incremental_backoff {
            base * BACKOFF_SCALE_TENTHS[self.reminder_index as usize] as u64 / 10
        } else {
            base
        }
    }

    /// How long a nudge waits for a response before counting the wearer
    /// as unresponsive (ms). Always the tightest backoff step.
    pub fn response_window_ms(&self) -> u64 {
        self.base_interval_secs as u64 * 1000 * BACKOFF_SCALE_TENTHS[0] as u64 / 10
    }

    /// Wearer confirmed they are on task: back off one step.
    pub fn affirm_on_task(&mut self) {
        let last = (BACKOFF_SCALE_TENTHS.len() - 1) as u8;
        self.reminder_index = (self.reminder_index + 1).min(last);
        self.on_task_count += 1;
    }

    /// Wearer reported distraction: tighten one step.
    pub fn affirm_distracted(&mut self) {
        self.reminder_index = self.reminder_index.saturating_sub(1);
        self.distract_count += 1;
    }

    /// No response within the window: tighten and count it.
    pub fn affirm_unresponsive(&mut self) {
        self.reminder_index = self.reminder_index.saturating_sub(1);
        self.unresponsive_count += 1;
    }

    pub fn mark_done(&mut self) {
        self.complete = true;
    }
}

/// Vector-font height that fits a task title across the screen:
/// inversely proportional to the title's width measured at size 176,
/// capped at 50 px.
pub fn title_font_height(width_at_176: i32) -> i32 {
    if width_at_176 <= 0 {
        return 50;
    }
    (160 * 176 / width_at_176).min(50)
}
