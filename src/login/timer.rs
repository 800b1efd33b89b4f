//! Resend cooldown.
//!
//! Deadline based: the owner calls [`ResendTimer::advance`] with the current
//! instant and every whole second that has elapsed is counted down. Dropping
//! the timer is the cancellation.

use crate::consts::cli_consts::login::countdown_tick;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendTimer {
    remaining: u32,
    next_tick: Option<Instant>,
}

impl ResendTimer {
    pub fn started(seconds: u32, now: Instant) -> Self {
        Self {
            remaining: seconds,
            next_tick: (seconds > 0).then(|| now + countdown_tick()),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    /// Applies all ticks due at `now`. Returns the number of ticks applied.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while let Some(due) = self.next_tick {
            if now < due {
                break;
            }
            self.remaining = self.remaining.saturating_sub(1);
            ticks += 1;
            self.next_tick = (self.remaining > 0).then(|| due + countdown_tick());
        }
        ticks
    }
}
