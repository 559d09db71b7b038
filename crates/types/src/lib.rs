//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the simulation.
//! All types are plain data with no behaviour beyond parsing/printing, making them
//! usable in any context (core logic, a renderer, a scripted driver).
//!
//! # Board Dimensions
//!
//! - **Columns**: fixed at 6 (indexed 0-5, left to right)
//! - **Rows**: variable; row 0 is the bottom-most (newest) row
//! - **Visible rows**: 12 above the incoming bottom row
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds, distances in pixel-equivalent units:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SCROLL_INTERVAL_MS` | 16 | Scroll timer period |
//! | `TILE_HEIGHT` | 54 | Scroll offset that spawns a new row |
//! | `TILE_MAX_STEP` | 18 | Max distance a tile travels per tick |
//! | `BLINK_MS` | 1000 | Blink duration after a match |
//! | `FADE_STEP` | 15 | Opacity lost per tick while disappearing |
//! | `PAUSE_MS` | 1000 | Scroll pause after a match |
//! | `COMBO_RESET_MS` | 1000 | Quiet interval before combo resets |
//!
//! # Examples
//!
//! ```
//! use puzzle_league_types::{Command, TileType, BOARD_COLUMNS};
//!
//! let tile = TileType::from_str("pink").unwrap();
//! assert_eq!(tile, TileType::Pink);
//! assert!(!tile.is_empty());
//!
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//! assert_eq!(BOARD_COLUMNS, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Number of tile columns on the board
pub const BOARD_COLUMNS: usize = 6;

/// Number of rows above the incoming bottom row that are visible/selectable
pub const VISIBLE_ROWS: usize = 12;

/// Default row cap: visible rows plus the incoming row
pub const MAX_ROWS: usize = VISIBLE_ROWS + 1;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Height of one tile in pixel-equivalent units
pub const TILE_HEIGHT: u32 = 54;

/// Width of one tile in pixel-equivalent units
pub const TILE_WIDTH: u32 = 54;

/// Scroll timer period
pub const SCROLL_INTERVAL_MS: u32 = 16;

/// Offset gained per scroll timer firing
pub const SCROLL_STEP: u32 = 1;

/// Maximum distance (per axis) a tile moves toward its slot in one tick
pub const TILE_MAX_STEP: u32 = 18;

/// How long a matched tile blinks before it starts fading
pub const BLINK_MS: u32 = 1000;

/// Opacity of a tile when it starts disappearing
pub const FADE_START: u8 = 255;

/// Opacity removed per tick while disappearing (255 / 15 = 17 ticks)
pub const FADE_STEP: u8 = 15;

/// Scroll pause after any match; retried until the board is stale
pub const PAUSE_MS: u32 = 1000;

/// Stale interval after which the combo falls back to 1
pub const COMBO_RESET_MS: u32 = 1000;

/// Base points awarded per matched tile (multiplied by combo)
pub const POINTS_PER_TILE: u32 = 100;

/// Score ceiling
pub const MAX_SCORE: u32 = 999_999_999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(TILE_HEIGHT, 54);
        assert_eq!(BLINK_MS, 1000);
        assert_eq!(FADE_START / FADE_STEP, 17);
        assert_eq!(MAX_ROWS, 13);
    }

    #[test]
    fn tile_type_names_round_trip() {
        for kind in TileType::ALL {
            assert_eq!(TileType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TileType::from_str("purple"), None);
    }

    #[test]
    fn command_names_round_trip() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::MoveUp,
            Command::MoveDown,
            Command::Swap,
            Command::TogglePause,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }
}

/// The kind of a tile
///
/// `Empty` is a genuine value: it occupies a slot but is never matched
/// or drawn. The five colours are the matchable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    #[default]
    Empty,
    Red,
    Pink,
    Yellow,
    Green,
    Blue,
}

impl TileType {
    /// Every kind, `Empty` first
    pub const ALL: [TileType; 6] = [
        TileType::Empty,
        TileType::Red,
        TileType::Pink,
        TileType::Yellow,
        TileType::Green,
        TileType::Blue,
    ];

    /// The matchable colours, in draw order
    pub const COLORS: [TileType; 5] = [
        TileType::Red,
        TileType::Pink,
        TileType::Yellow,
        TileType::Green,
        TileType::Blue,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, TileType::Empty)
    }

    /// Parse tile type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzle_league_types::TileType;
    ///
    /// assert_eq!(TileType::from_str("RED"), Some(TileType::Red));
    /// assert_eq!(TileType::from_str("empty"), Some(TileType::Empty));
    /// assert_eq!(TileType::from_str("-"), Some(TileType::Empty));
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" | "-" => Some(TileType::Empty),
            "red" | "r" => Some(TileType::Red),
            "pink" | "p" => Some(TileType::Pink),
            "yellow" | "y" => Some(TileType::Yellow),
            "green" | "g" => Some(TileType::Green),
            "blue" | "b" => Some(TileType::Blue),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Empty => "empty",
            TileType::Red => "red",
            TileType::Pink => "pink",
            TileType::Yellow => "yellow",
            TileType::Green => "green",
            TileType::Blue => "blue",
        }
    }
}

/// Per-tile lifecycle
///
/// The cycle goes: Idle → Blinking → Disappearing → Removed.
/// `Removed` is terminal; the grid replaces such a tile with an Empty one
/// in the same slot before the next gravity/match pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Idle,
    Blinking,
    Disappearing,
    Removed,
}

/// What a consumer can see about one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileView {
    pub kind: TileType,
    pub lifecycle: Lifecycle,
    /// False while the tile is still travelling toward its slot
    pub active: bool,
}

/// Commands that an input layer (human or scripted) feeds into the simulation
///
/// Commands are queued and applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move the cursor one column left
    MoveLeft,
    /// Move the cursor one column right
    MoveRight,
    /// Move the cursor one row up (away from the incoming row)
    MoveUp,
    /// Move the cursor one row down
    MoveDown,
    /// Swap the pair under the cursor
    Swap,
    /// Swap `(col, row)` with `(col + 1, row)` regardless of the cursor
    SwapAt { col: usize, row: usize },
    /// Toggle the external (menu) pause
    TogglePause,
}

impl Command {
    /// Parse a cursor/pause command from string
    ///
    /// `SwapAt` carries coordinates and has no string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzle_league_types::Command;
    ///
    /// assert_eq!(Command::from_str("swap"), Some(Command::Swap));
    /// assert_eq!(Command::from_str("TOGGLEPAUSE"), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "moveup" => Some(Command::MoveUp),
            "movedown" => Some(Command::MoveDown),
            "swap" => Some(Command::Swap),
            "togglepause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveUp => "moveUp",
            Command::MoveDown => "moveDown",
            Command::Swap => "swap",
            Command::SwapAt { .. } => "swapAt",
            Command::TogglePause => "togglePause",
        }
    }
}

/// Core-side events, buffered until the consumer drains them.
///
/// Renderers, particle systems and score widgets listen to these instead of
/// polling every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimEvent {
    /// A tile at this slot was confirmed part of a run and started blinking
    TileMatched { row: usize, col: usize },
    /// The score changed to the given total
    ScoreChanged(u32),
    /// The combo multiplier changed to the given value
    ComboChanged(u32),
    /// A new row was inserted at the bottom
    RowSpawned,
    /// The stack exceeded the row cap; the simulation stopped
    GameOver,
}
