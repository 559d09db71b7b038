//! Simulation configuration.
//!
//! Every tunable defaults to the constant of the same name in the types crate.
//! Missing fields in a deserialized config fall back to those defaults.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::*;

/// Which rows may take part in matches and swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowActivation {
    /// The incoming bottom row (index 0) is inert until the next row pushes it up
    #[default]
    BottomRowInactive,
    /// Every row is live as soon as it exists
    AllRows,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub scroll_interval_ms: u32,
    pub scroll_step: u32,
    pub tile_height: u32,
    pub tile_width: u32,
    pub tile_max_step: u32,
    pub blink_ms: u32,
    pub fade_step: u8,
    pub pause_ms: u32,
    pub combo_reset_ms: u32,
    pub points_per_tile: u32,
    pub max_score: u32,
    pub row_activation: RowActivation,
    /// Random rows spawned when the simulation is created
    pub initial_rows: usize,
    /// Top-out threshold; `None` lets the stack grow forever
    pub max_rows: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scroll_interval_ms: SCROLL_INTERVAL_MS,
            scroll_step: SCROLL_STEP,
            tile_height: TILE_HEIGHT,
            tile_width: TILE_WIDTH,
            tile_max_step: TILE_MAX_STEP,
            blink_ms: BLINK_MS,
            fade_step: FADE_STEP,
            pause_ms: PAUSE_MS,
            combo_reset_ms: COMBO_RESET_MS,
            points_per_tile: POINTS_PER_TILE,
            max_score: MAX_SCORE,
            row_activation: RowActivation::default(),
            initial_rows: 0,
            max_rows: Some(MAX_ROWS),
        }
    }
}

/// Largest tile dimension or step that keeps a full stack of positions in `i32`
pub const MAX_TILE_EXTENT: u32 = i32::MAX as u32 / (MAX_ROWS as u32 + 2);

impl SimConfig {
    /// Reject values that would stall the simulation, divide by zero, or
    /// overflow a tile position
    pub fn validate(&self) -> CoreResult<()> {
        if self.scroll_interval_ms == 0 {
            return Err(CoreError::InvalidConfig("scroll_interval_ms must be > 0"));
        }
        if self.tile_height == 0 || self.tile_width == 0 {
            return Err(CoreError::InvalidConfig("tile dimensions must be > 0"));
        }
        if self.tile_height > MAX_TILE_EXTENT || self.tile_width > MAX_TILE_EXTENT {
            return Err(CoreError::InvalidConfig("tile dimensions are too large"));
        }
        if self.tile_max_step == 0 {
            return Err(CoreError::InvalidConfig("tile_max_step must be > 0"));
        }
        if self.tile_max_step > MAX_TILE_EXTENT {
            return Err(CoreError::InvalidConfig("tile_max_step is too large"));
        }
        if self.fade_step == 0 {
            return Err(CoreError::InvalidConfig("fade_step must be > 0"));
        }
        if self.pause_ms == 0 || self.combo_reset_ms == 0 {
            return Err(CoreError::InvalidConfig("pause/combo intervals must be > 0"));
        }
        if matches!(self.max_rows, Some(0)) {
            return Err(CoreError::InvalidConfig("max_rows must be > 0"));
        }
        Ok(())
    }
}
