//! Gravity - column compaction, one slot per pass
//!
//! Each column is scanned bottom to top with a stack of Empty slots seen so
//! far. A movable tile above a queued gap drops into the nearest one (the slot
//! directly beneath it) and leaves its own slot queued behind it, so a pass
//! moves every unsupported tile down exactly one slot. A tile that cannot move
//! (blinking, fading or in flight) supports everything above it and clears the
//! stack.
//!
//! Dropped tiles travel to their new slot over the following ticks and are
//! inactive until they arrive, so a falling column settles over several passes.

use crate::grid::Grid;
use crate::types::BOARD_COLUMNS;

/// Compact one column by one slot. Returns the number of tiles moved.
pub fn compact_column(grid: &mut Grid, col: usize) -> usize {
    if col >= BOARD_COLUMNS {
        return 0;
    }

    let mut gaps: Vec<usize> = Vec::new();
    let mut moved = 0;

    for row in 0..grid.row_count() {
        let Some(tile) = grid.get(row, col) else {
            break;
        };

        if tile.is_empty() {
            gaps.push(row);
            continue;
        }
        if gaps.is_empty() {
            continue;
        }

        if tile.can_be_swapped() {
            if let Some(target) = gaps.pop() {
                grid.drop_tile(col, row, target);
                gaps.push(row);
                moved += 1;
            }
        } else {
            gaps.clear();
        }
    }

    moved
}

/// Run one gravity pass and trim empty rows off the top.
///
/// When the grid asks for gravity every column is visited, otherwise only
/// columns dirtied since the last match pass. The request stays up until a
/// pass moves nothing.
pub fn apply(grid: &mut Grid) -> usize {
    let all = grid.gravity_dirty();
    let mut moved = 0;
    for col in 0..BOARD_COLUMNS {
        if all || grid.is_col_dirty(col) {
            moved += compact_column(grid, col);
        }
    }

    grid.set_gravity_dirty(moved > 0);
    grid.remove_empty_top_rows();
    moved
}
