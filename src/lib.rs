//! Puzzle League (workspace facade crate).
//!
//! This package exposes `puzzle_league::{core, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use puzzle_league_core as core;
pub use puzzle_league_types as types;
