//! Scroll scheduler - the stack rises one step per interval
//!
//! The offset grows by `scroll_step` every `scroll_interval_ms` unless scrolling
//! is paused. Reaching a full tile height asks for a new bottom row and the
//! offset goes back to 0.

use crate::config::SimConfig;
use crate::timer::Countdown;

#[derive(Debug, Clone)]
pub struct ScrollScheduler {
    timer: Countdown,
    offset: u32,
    step: u32,
    tile_height: u32,
    paused: bool,
}

impl ScrollScheduler {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            timer: Countdown::recurring(config.scroll_interval_ms),
            offset: 0,
            step: config.scroll_step,
            tile_height: config.tile_height.max(1),
            paused: false,
        }
    }

    /// Advance by `dt_ms`; returns the number of rows to spawn
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        let fires = self.timer.advance(dt_ms);
        if self.paused {
            return 0;
        }

        let mut spawns = 0;
        for _ in 0..fires {
            self.offset = self.offset.saturating_add(self.step);
            if self.offset >= self.tile_height {
                self.offset = 0;
                spawns += 1;
            }
        }
        spawns
    }

    /// Current offset, `0..tile_height`
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}
