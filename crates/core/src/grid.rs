//! Grid module - a variable number of rows, six columns each
//!
//! Row 0 is the bottom-most (newest) row; new rows are inserted at index 0 and
//! everything else moves up one index. A tile is addressed by `(row, col)` and
//! every mutation goes through the grid, which keeps the dirty flags:
//!
//! - a dirty row/column is re-scanned by the next match pass, which clears it
//! - `gravity_dirty` asks the compactor to look at every column next pass
//!
//! Positions are pixel-equivalents: slot `(row, col)` rests at
//! `(col * tile_width, row * tile_height + scroll_offset)`.

use crate::config::{RowActivation, SimConfig};
use crate::error::{CoreError, CoreResult};
use crate::matcher::{check_matches, check_row_matches, Matchable};
use crate::tile::Tile;
use crate::types::{Lifecycle, TileType, BOARD_COLUMNS};

/// One row of six slots plus its horizontal dirty flag
#[derive(Debug, Clone)]
pub struct Row {
    tiles: [Tile; BOARD_COLUMNS],
    dirty: bool,
}

impl Row {
    pub fn tiles(&self) -> &[Tile; BOARD_COLUMNS] {
        &self.tiles
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True when every slot holds an Empty tile
    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(Tile::is_empty)
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Row>,
    col_dirty: [bool; BOARD_COLUMNS],
    gravity_dirty: bool,
    activation: RowActivation,
    tile_width: u32,
    tile_height: u32,
}

impl Grid {
    /// Create an empty grid (no rows)
    pub fn new(config: &SimConfig) -> Self {
        Self {
            rows: Vec::new(),
            col_dirty: [true; BOARD_COLUMNS],
            gravity_dirty: false,
            activation: config.row_activation,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
        }
    }

    /// Build a grid from literal rows, bottom row first, every tile at rest.
    ///
    /// Useful for scripted boards and tests.
    pub fn from_types(config: &SimConfig, rows: &[[TileType; BOARD_COLUMNS]]) -> Self {
        let mut grid = Self::new(config);
        for (r, kinds) in rows.iter().enumerate() {
            let mut tiles = [Tile::empty(); BOARD_COLUMNS];
            for (c, kind) in kinds.iter().enumerate() {
                let (x, y) = grid.slot_position(r, c, 0);
                tiles[c] = Tile::placed(*kind, x, y);
            }
            grid.rows.push(Row { tiles, dirty: true });
        }
        grid.gravity_dirty = true;
        grid
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Tile at `(row, col)`; None if out of range
    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        self.rows.get(row).and_then(|r| r.tiles.get(col))
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        self.rows.get_mut(row).and_then(|r| r.tiles.get_mut(col))
    }

    /// Kinds of column `col`, bottom to top
    pub fn column(&self, col: usize) -> Vec<TileType> {
        if col >= BOARD_COLUMNS {
            return Vec::new();
        }
        self.rows.iter().map(|r| r.tiles[col].kind()).collect()
    }

    /// Resting position of slot `(row, col)` for a given scroll offset.
    ///
    /// Saturates at `i32::MAX` instead of wrapping.
    pub fn slot_position(&self, row: usize, col: usize, offset: u32) -> (i32, i32) {
        let x = saturate(col).saturating_mul(saturate(self.tile_width));
        let y = saturate(row)
            .saturating_mul(saturate(self.tile_height))
            .saturating_add(saturate(offset));
        (x, y)
    }

    /// Whether tiles in `row` may be matched or swapped under the activation policy
    pub fn is_row_live(&self, row: usize) -> bool {
        match self.activation {
            RowActivation::AllRows => row < self.rows.len(),
            RowActivation::BottomRowInactive => row >= 1 && row < self.rows.len(),
        }
    }

    /// Match key of a slot, honouring the row activation policy
    pub fn match_key_at(&self, row: usize, col: usize) -> Option<TileType> {
        if !self.is_row_live(row) {
            return None;
        }
        self.get(row, col).and_then(Matchable::match_key)
    }

    // ----- dirty tracking -------------------------------------------------

    pub fn is_row_dirty(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.dirty)
    }

    pub fn is_col_dirty(&self, col: usize) -> bool {
        self.col_dirty.get(col).copied().unwrap_or(false)
    }

    pub fn gravity_dirty(&self) -> bool {
        self.gravity_dirty
    }

    pub(crate) fn set_gravity_dirty(&mut self, dirty: bool) {
        self.gravity_dirty = dirty;
    }

    pub(crate) fn mark_row_dirty(&mut self, row: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            r.dirty = true;
        }
    }

    pub(crate) fn mark_col_dirty(&mut self, col: usize) {
        if let Some(c) = self.col_dirty.get_mut(col) {
            *c = true;
        }
    }

    fn mark_slot_dirty(&mut self, row: usize, col: usize) {
        self.mark_row_dirty(row);
        self.mark_col_dirty(col);
    }

    // ----- structural mutation --------------------------------------------

    /// Insert a row of fresh tiles at index 0.
    ///
    /// The tiles rest at their slot for the given scroll offset. All columns,
    /// the new row and the row it pushed up are dirtied.
    pub fn add_row_at_bottom(&mut self, kinds: [TileType; BOARD_COLUMNS], offset: u32) {
        let mut tiles = [Tile::empty(); BOARD_COLUMNS];
        for (c, kind) in kinds.into_iter().enumerate() {
            let (x, y) = self.slot_position(0, c, offset);
            tiles[c] = Tile::placed(kind, x, y);
        }
        self.rows.insert(0, Row { tiles, dirty: true });
        self.mark_row_dirty(1);
        self.col_dirty = [true; BOARD_COLUMNS];
    }

    /// Place every tile at rest in its slot
    pub(crate) fn snap_to_slots(&mut self, offset: u32) {
        for r in 0..self.rows.len() {
            for c in 0..BOARD_COLUMNS {
                let (x, y) = self.slot_position(r, c, offset);
                self.rows[r].tiles[c].snap_to(x, y);
            }
        }
    }

    /// Remove row `row`; rows above it move down one index
    pub fn remove_row(&mut self, row: usize) -> bool {
        if row >= self.rows.len() {
            return false;
        }
        self.rows.remove(row);
        self.col_dirty = [true; BOARD_COLUMNS];
        for r in row..self.rows.len() {
            self.mark_row_dirty(r);
        }
        true
    }

    /// Drop fully Empty rows from the top of the stack. Returns how many.
    pub fn remove_empty_top_rows(&mut self) -> usize {
        let mut removed = 0;
        while self.rows.last().is_some_and(Row::is_empty) {
            self.rows.pop();
            removed += 1;
        }
        removed
    }

    /// Swap `(row, col)` with `(row, col + 1)`.
    ///
    /// Both tiles must be swappable and the row must be live. Swapped tiles
    /// travel to their new slot; a swap that moves an Empty tile flags gravity.
    pub fn swap(&mut self, row: usize, col: usize) -> CoreResult<()> {
        if row >= self.rows.len() || col + 1 >= BOARD_COLUMNS {
            return Err(CoreError::OutOfRange { row, col });
        }
        if !self.is_row_live(row) {
            return Err(CoreError::SwapRejected { row, col });
        }

        let tiles = &mut self.rows[row].tiles;
        if !tiles[col].can_be_swapped() || !tiles[col + 1].can_be_swapped() {
            return Err(CoreError::SwapRejected { row, col });
        }

        tiles.swap(col, col + 1);
        tiles[col].mark_in_flight();
        tiles[col + 1].mark_in_flight();
        let opened_gap = tiles[col].is_empty() || tiles[col + 1].is_empty();

        self.mark_row_dirty(row);
        self.mark_col_dirty(col);
        self.mark_col_dirty(col + 1);
        if opened_gap {
            self.gravity_dirty = true;
        }
        Ok(())
    }

    /// Move the tile at `(from, col)` into the Empty slot `(to, col)`.
    ///
    /// Used by the gravity compactor; the moved tile goes in flight.
    pub(crate) fn drop_tile(&mut self, col: usize, from: usize, to: usize) {
        if from >= self.rows.len() || to >= self.rows.len() || col >= BOARD_COLUMNS {
            return;
        }
        let moving = self.rows[from].tiles[col];
        self.rows[from].tiles[col] = self.rows[to].tiles[col];
        self.rows[to].tiles[col] = moving;
        self.rows[to].tiles[col].mark_in_flight();

        self.mark_row_dirty(from);
        self.mark_row_dirty(to);
        self.mark_col_dirty(col);
    }

    // ----- per-tick passes -------------------------------------------------

    /// Advance every tile's blink/fade. Tiles that reach `Removed` are replaced
    /// by Empty tiles in the same slot. Returns how many were replaced.
    pub fn advance_lifecycles(&mut self, dt_ms: u32, fade_step: u8) -> usize {
        let mut cleared = Vec::new();
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, tile) in row.tiles.iter_mut().enumerate() {
                if tile.advance_lifecycle(dt_ms, fade_step) {
                    let (x, y) = tile.position();
                    *tile = Tile::placed(TileType::Empty, x, y);
                    cleared.push((r, c));
                }
            }
        }

        for &(r, c) in &cleared {
            self.mark_slot_dirty(r, c);
        }
        if !cleared.is_empty() {
            self.gravity_dirty = true;
        }
        cleared.len()
    }

    /// Move every tile one step toward its slot. Activity changes dirty the
    /// tile's row and column.
    pub fn animate(&mut self, offset: u32, max_step: u32) {
        let mut changed = Vec::new();
        for r in 0..self.rows.len() {
            for c in 0..BOARD_COLUMNS {
                let target = self.slot_position(r, c, offset);
                if self.rows[r].tiles[c].step_toward(target, max_step) {
                    changed.push((r, c));
                }
            }
        }
        for (r, c) in changed {
            self.mark_slot_dirty(r, c);
        }
    }

    /// Every tile is swappable: nothing blinking, fading or in flight
    pub fn is_stale(&self) -> bool {
        self.rows
            .iter()
            .all(|r| r.tiles.iter().all(Tile::can_be_swapped))
    }

    /// A Removed tile must never survive into a gravity/match pass
    pub fn check_invariants(&self) -> CoreResult<()> {
        for (r, row) in self.rows.iter().enumerate() {
            for (c, tile) in row.tiles.iter().enumerate() {
                if tile.lifecycle() == Lifecycle::Removed {
                    return Err(CoreError::Invariant(format!(
                        "removed tile left at ({r}, {c})"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Replace any lingering Removed tile by an Empty one. Returns how many.
    pub fn normalize_removed(&mut self) -> usize {
        let mut fixed = Vec::new();
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, tile) in row.tiles.iter_mut().enumerate() {
                if tile.lifecycle() == Lifecycle::Removed {
                    let (x, y) = tile.position();
                    *tile = Tile::placed(TileType::Empty, x, y);
                    fixed.push((r, c));
                }
            }
        }
        for &(r, c) in &fixed {
            self.mark_slot_dirty(r, c);
        }
        if !fixed.is_empty() {
            self.gravity_dirty = true;
        }
        fixed.len()
    }

    /// Scan dirty rows and columns for runs and clear their flags.
    ///
    /// Returns the de-duplicated matched slots as `(row, col)`, sorted.
    pub fn collect_matches(&mut self) -> Vec<(usize, usize)> {
        let height = self.rows.len();
        let mut hit = vec![false; height * BOARD_COLUMNS];
        let mut out = Vec::new();

        for r in 0..height {
            if !self.rows[r].dirty {
                continue;
            }
            let mut keys = [None; BOARD_COLUMNS];
            for (c, key) in keys.iter_mut().enumerate() {
                *key = self.match_key_at(r, c);
            }
            for c in check_row_matches(&keys) {
                if !hit[r * BOARD_COLUMNS + c] {
                    hit[r * BOARD_COLUMNS + c] = true;
                    out.push((r, c));
                }
            }
            self.rows[r].dirty = false;
        }

        for c in 0..BOARD_COLUMNS {
            if !self.col_dirty[c] {
                continue;
            }
            let keys: Vec<Option<TileType>> = (0..height).map(|r| self.match_key_at(r, c)).collect();
            for r in check_matches(&keys) {
                if !hit[r * BOARD_COLUMNS + c] {
                    hit[r * BOARD_COLUMNS + c] = true;
                    out.push((r, c));
                }
            }
            self.col_dirty[c] = false;
        }

        out.sort_unstable();
        out
    }

    /// Kinds of the whole grid, bottom row first
    pub fn to_types(&self) -> Vec<[TileType; BOARD_COLUMNS]> {
        self.rows
            .iter()
            .map(|r| {
                let mut kinds = [TileType::Empty; BOARD_COLUMNS];
                for (k, t) in kinds.iter_mut().zip(r.tiles.iter()) {
                    *k = t.kind();
                }
                kinds
            })
            .collect()
    }
}

fn saturate<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}
