//! Stage countdown.
//!
//! The clock is driven by the caller: each frame reports how much time has
//! passed, and the timer drops one second for every whole second that has
//! accumulated. Partial seconds carry over to the next call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A countdown in whole seconds that never goes below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimer {
    seconds_left: u32,
    carry: Duration,
}

impl StageTimer {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds_left: seconds,
            carry: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.seconds_left == 0
    }

    /// Feed elapsed time into the countdown.
    ///
    /// Returns how many seconds were taken off. Once expired, further time is
    /// discarded.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.is_expired() {
            self.carry = Duration::ZERO;
            return 0;
        }

        self.carry += elapsed;
        let whole = self.carry.as_secs();
        self.carry = Duration::new(0, self.carry.subsec_nanos());

        let ticked = whole.min(u64::from(self.seconds_left)) as u32;
        self.seconds_left -= ticked;
        if self.is_expired() {
            self.carry = Duration::ZERO;
        }
        ticked
    }

    /// Start over from `seconds`.
    pub fn reset(&mut self, seconds: u32) {
        self.seconds_left = seconds;
        self.carry = Duration::ZERO;
    }
}
