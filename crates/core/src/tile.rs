//! Tile module - a single matchable unit and its lifecycle
//!
//! Lifecycle: `Idle → Blinking → Disappearing → Removed`.
//!
//! - `on_matched` starts blinking (once; later calls are no-ops)
//! - the blink countdown runs on elapsed milliseconds
//! - the fade runs per tick, `fade_step` at a time, from 255 down to 0
//! - a `Removed` tile is replaced by [`Tile::empty`] by the grid
//!
//! Tiles also carry a pixel-equivalent position. Each tick the grid computes the
//! tile's slot position and the tile moves at most `max_step` toward it; while it
//! has not arrived the tile is inactive and can neither be matched nor swapped.

use crate::types::{Lifecycle, TileType, TileView, FADE_START};

#[derive(Debug, Clone, Copy)]
pub struct Tile {
    kind: TileType,
    lifecycle: Lifecycle,
    matched: bool,
    active: bool,
    blink_remaining_ms: u32,
    fade: u8,
    x: i32,
    y: i32,
}

impl Tile {
    /// A fresh idle tile of the given kind, resting at the origin
    pub fn new(kind: TileType) -> Self {
        Self {
            kind,
            lifecycle: Lifecycle::Idle,
            matched: false,
            active: true,
            blink_remaining_ms: 0,
            fade: FADE_START,
            x: 0,
            y: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(TileType::Empty)
    }

    /// A fresh idle tile already resting at `(x, y)`
    pub fn placed(kind: TileType, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> TileType {
        self.kind
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Current opacity (255 = opaque)
    pub fn fade(&self) -> u8 {
        self.fade
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Eligible to take part in a run
    pub fn can_be_matched(&self) -> bool {
        !self.matched && !self.is_empty() && self.active
    }

    /// Empty tiles are always swappable; others only when idle and resting
    pub fn can_be_swapped(&self) -> bool {
        self.is_empty() || (!self.matched && self.active)
    }

    /// Confirm this tile as part of a run.
    ///
    /// Returns true if the tile transitioned; a tile that is already matched
    /// (or Empty) is left untouched.
    pub fn on_matched(&mut self, blink_ms: u32) -> bool {
        if self.matched || self.is_empty() {
            return false;
        }
        self.matched = true;
        self.lifecycle = Lifecycle::Blinking;
        self.blink_remaining_ms = blink_ms;
        true
    }

    /// Advance blink/fade by one tick. Returns true once the tile is `Removed`.
    pub fn advance_lifecycle(&mut self, dt_ms: u32, fade_step: u8) -> bool {
        match self.lifecycle {
            Lifecycle::Idle => false,
            Lifecycle::Blinking => {
                self.blink_remaining_ms = self.blink_remaining_ms.saturating_sub(dt_ms);
                if self.blink_remaining_ms == 0 {
                    self.lifecycle = Lifecycle::Disappearing;
                    self.fade = FADE_START;
                }
                false
            }
            Lifecycle::Disappearing => {
                self.fade = self.fade.saturating_sub(fade_step);
                if self.fade == 0 {
                    self.lifecycle = Lifecycle::Removed;
                    return true;
                }
                false
            }
            Lifecycle::Removed => true,
        }
    }

    /// Move toward `target`, at most `max_step` per axis.
    ///
    /// Returns true if the active flag changed, which the grid turns into
    /// dirty row/column flags. Empty tiles snap and stay active.
    pub fn step_toward(&mut self, target: (i32, i32), max_step: u32) -> bool {
        if self.is_empty() {
            self.x = target.0;
            self.y = target.1;
            return false;
        }

        let max = i32::try_from(max_step).unwrap_or(i32::MAX);
        self.x = self
            .x
            .saturating_add(target.0.saturating_sub(self.x).clamp(-max, max));
        self.y = self
            .y
            .saturating_add(target.1.saturating_sub(self.y).clamp(-max, max));

        let arrived = (self.x, self.y) == target;
        let changed = arrived != self.active;
        self.active = arrived;
        changed
    }

    /// Put the tile at rest at `(x, y)`
    pub(crate) fn snap_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.active = true;
    }

    /// The tile was moved to a new slot; it travels until the next steps close the gap.
    ///
    /// Returns true if the active flag changed.
    pub(crate) fn mark_in_flight(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let changed = self.active;
        self.active = false;
        changed
    }

    pub fn view(&self) -> TileView {
        TileView {
            kind: self.kind,
            lifecycle: self.lifecycle,
            active: self.active,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }

    #[cfg(test)]
    pub(crate) fn force_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::empty()
    }
}
