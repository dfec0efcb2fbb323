//! System clock adapter.
//!
//! Provides monotonic time for the alarm controller and a wall-clock
//! display string for alert-log entries.
//!
//! - **`now_ms`** — `std::time::Instant` since construction; never jumps.
//! - **`timestamp`** — `chrono::Local`, formatted like the backend's log
//!   (`dd/mm/yyyy, HH:MM:SS`).

use std::time::Instant;

use crate::app::ports::ClockPort;

/// Display format for registration timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn timestamp(&self) -> String {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}
