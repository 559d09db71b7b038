//! Core simulation - pure, deterministic, and testable
//!
//! This crate contains the rules of a continuously scrolling match-3 puzzle.
//! It has **zero dependencies** on rendering, input devices, or I/O, making it:
//!
//! - **Deterministic**: same seed, config and command stream give identical games
//! - **Testable**: every rule is exercised by unit tests next to its module
//! - **Portable**: runs in any host (terminal, GUI, headless replay)
//!
//! # Module Structure
//!
//! - [`tile`]: a single tile, its blink/fade lifecycle and slide animation
//! - [`grid`]: six columns of tiles with dirty tracking and swaps
//! - [`matcher`]: greedy single-pass detection of runs of 3+
//! - [`gravity`]: one-slot-per-pass column compaction
//! - [`scroll`]: the rising stack and row spawns
//! - [`scoring`]: per-tile points, combo multiplier, display strings
//! - [`cursor`]: the player's pair selector
//! - [`game_state`]: the [`Simulation`] driver and its fixed tick order
//! - [`rng`]: seeded LCG and the explicit simulation context
//! - [`timer`]: polled countdowns
//!
//! # Rules
//!
//! - **Scrolling**: the stack rises one step per interval; a full tile height spawns a row
//! - **Swapping**: two horizontally adjacent idle tiles trade places
//! - **Matching**: 3+ equal tiles in a row or column blink, fade and vanish
//! - **Gravity**: tiles above a gap drop one slot per pass
//! - **Combo**: a match caused by falling tiles, with no swap in between, raises the multiplier
//! - **Top-out**: the game ends when the stack grows past the row cap
//!
//! # Example
//!
//! ```
//! use puzzle_league_core::{Grid, SimConfig, Simulation};
//! use puzzle_league_core::types::TileType::{Blue as B, Green as G, Red as R};
//! use puzzle_league_core::types::TICK_MS;
//!
//! let config = SimConfig::default();
//! let grid = Grid::from_types(&config, &[[G, B, G, B, G, B], [R, R, B, R, G, B]]);
//! let mut sim = Simulation::with_grid(config, 12345, grid).unwrap();
//!
//! // Swap (col 2, row 1) with (col 3, row 1): R R R B G B
//! assert!(sim.request_swap(2, 1));
//! for _ in 0..4 {
//!     sim.tick(TICK_MS);
//! }
//! assert_eq!(sim.score(), 300);
//! assert!(sim.scroll_paused());
//! ```
//!
//! # Timing
//!
//! The simulation uses a fixed timestep:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Scroll**: one pixel-equivalent every 16ms, a row every 54 steps
//! - **Blink**: 1000ms, then a 17-tick fade
//!
//! Call [`Simulation::tick`](game_state::Simulation::tick) every frame with elapsed time.

pub mod config;
pub mod cursor;
pub mod error;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod scroll;
pub mod snapshot;
pub mod tile;
pub mod timer;

pub use puzzle_league_types as types;

// Re-export commonly used types for convenience
pub use config::{RowActivation, SimConfig};
pub use cursor::Cursor;
pub use error::{CoreError, CoreResult};
pub use game_state::Simulation;
pub use grid::Grid;
pub use matcher::{check_matches, check_row_matches, Matchable};
pub use rng::{SimContext, SimpleRng};
pub use scoring::{apply_points, format_combo, format_score, points_for_match, ScoreState};
pub use snapshot::GameSnapshot;
pub use tile::Tile;
