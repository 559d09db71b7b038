//! Polled countdown timers.
//!
//! A timer never calls back. The driver advances it once per tick and reacts
//! to the returned firing count with a plain conditional, which keeps the order
//! of effects inside a tick fixed.

/// A countdown that fires after `interval_ms` of accumulated time.
///
/// In recurring mode the remainder carries over and a single large `dt` can
/// fire more than once. A one-shot timer stops after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    interval_ms: u32,
    elapsed_ms: u32,
    running: bool,
    recurring: bool,
}

impl Countdown {
    /// A recurring timer, running from the start
    pub fn recurring(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: true,
            recurring: true,
        }
    }

    /// A stopped one-shot timer; call [`Countdown::restart`] to arm it
    pub fn one_shot(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: false,
            recurring: false,
        }
    }

    /// Advance by `dt_ms` and return how many times the timer fired.
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms < self.interval_ms {
            return 0;
        }

        if self.recurring {
            let fires = self.elapsed_ms / self.interval_ms;
            self.elapsed_ms %= self.interval_ms;
            fires
        } else {
            self.elapsed_ms = 0;
            self.running = false;
            1
        }
    }

    /// Reset accumulated time and (re)arm
    pub fn restart(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Reset accumulated time without disarming
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}
