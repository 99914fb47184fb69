//! Button debouncing
//!
//! A mechanical button chatters for a few milliseconds around every press and
//! release. The debouncer only reports a new level once the raw reading has
//! held it for [`DEBOUNCE_MS`].

use crate::system::peripherals::ButtonState;

/// Time a raw level has to stay unchanged before it is reported (ms)
pub const DEBOUNCE_MS: u64 = 30;

/// Turns raw button samples into stable levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    stable: ButtonState,
    candidate: ButtonState,
    candidate_since_ms: u64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    /// Starts out released
    pub const fn new() -> Self {
        Self {
            stable: ButtonState::Released,
            candidate: ButtonState::Released,
            candidate_since_ms: 0,
        }
    }

    /// Feeds one raw sample taken at `now_ms` and returns the stable level
    pub fn update(&mut self, raw: ButtonState, now_ms: u64) -> ButtonState {
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
        } else if self.candidate != self.stable
            && now_ms.saturating_sub(self.candidate_since_ms) >= DEBOUNCE_MS
        {
            self.stable = self.candidate;
        }
        self.stable
    }
}
