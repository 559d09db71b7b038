//! Match detection - single greedy scan for runs of 3+
//!
//! Input is one row, or one column in either direction. Output is the
//! ascending list of indices that belong to a run of at least three
//! consecutive eligible slots with equal type.
//!
//! The scan walks pairs `(pos, pos + 1)` starting at `pos = 1` and never looks
//! back further than `pos - 1`:
//!
//! - pair differs: no run can include both, jump 2
//! - pair equal, a run is already open: extend by `pos + 1`, step 1
//! - pair equal, `pos - 1` equal too: open `{pos - 1, pos, pos + 1}`, step 1
//! - pair equal, `pos + 2` equal too: open `{pos, pos + 1, pos + 2}`, step 2
//! - pair equal, neither side equal: a lone pair, jump 3
//!
//! Every indexed read is bounds-checked.

use arrayvec::ArrayVec;

use crate::tile::Tile;
use crate::types::{TileType, BOARD_COLUMNS};

/// Anything the detector can compare: `None` means "not eligible".
pub trait Matchable {
    fn match_key(&self) -> Option<TileType>;
}

impl Matchable for Tile {
    fn match_key(&self) -> Option<TileType> {
        self.can_be_matched().then(|| self.kind())
    }
}

impl Matchable for Option<TileType> {
    fn match_key(&self) -> Option<TileType> {
        self.filter(|kind| !kind.is_empty())
    }
}

impl Matchable for TileType {
    fn match_key(&self) -> Option<TileType> {
        (!self.is_empty()).then_some(*self)
    }
}

#[inline]
fn same<T: Matchable>(cells: &[T], a: usize, b: usize) -> bool {
    match (cells.get(a), cells.get(b)) {
        (Some(x), Some(y)) => match (x.match_key(), y.match_key()) {
            (Some(kx), Some(ky)) => kx == ky,
            _ => false,
        },
        _ => false,
    }
}

/// Scan `cells` and call `emit` for every matched index, ascending, once each.
fn scan<T: Matchable>(cells: &[T], mut emit: impl FnMut(usize)) {
    let len = cells.len();
    let mut last: Option<usize> = None;
    let mut push = |i: usize| {
        if last.map_or(true, |l| i > l) {
            last = Some(i);
            emit(i);
        }
    };

    let mut pos = 1usize;
    let mut prev_same = false;
    while pos + 1 < len {
        if same(cells, pos, pos + 1) {
            if prev_same {
                push(pos + 1);
                pos += 1;
            } else if same(cells, pos - 1, pos) {
                push(pos - 1);
                push(pos);
                push(pos + 1);
                prev_same = true;
                pos += 1;
            } else if pos + 2 < len && same(cells, pos, pos + 2) {
                push(pos);
                push(pos + 1);
                push(pos + 2);
                prev_same = true;
                pos += 2;
            } else {
                prev_same = false;
                pos += 3;
            }
        } else {
            prev_same = false;
            pos += 2;
        }
    }
}

/// Indices of every slot that belongs to a run of 3+, ascending.
///
/// # Examples
///
/// ```
/// use puzzle_league_core::matcher::check_matches;
/// use puzzle_league_core::types::TileType::{Blue as B, Red as A};
///
/// assert_eq!(check_matches(&[A, A, B, B, B, A]), vec![2, 3, 4]);
/// assert!(check_matches(&[A, B, A, B, A, B]).is_empty());
/// ```
pub fn check_matches<T: Matchable>(cells: &[T]) -> Vec<usize> {
    let mut out = Vec::new();
    scan(cells, |i| out.push(i));
    out
}

/// Allocation-free variant for a single board row.
pub fn check_row_matches<T: Matchable>(cells: &[T; BOARD_COLUMNS]) -> ArrayVec<usize, BOARD_COLUMNS> {
    let mut out = ArrayVec::new();
    scan(cells, |i| out.push(i));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::TileType::{Blue as B, Empty as E, Green as C, Red as A};

    /// Reference implementation: measure every maximal run.
    fn brute_force(cells: &[Option<TileType>]) -> Vec<usize> {
        let mut out = Vec::new();
        let mut start = 0;
        while start < cells.len() {
            let key = cells[start].match_key();
            let mut end = start + 1;
            if key.is_some() {
                while end < cells.len() && cells[end].match_key() == key {
                    end += 1;
                }
                if end - start >= 3 {
                    out.extend(start..end);
                }
            }
            start = end;
        }
        out
    }

    #[test]
    fn test_run_at_start() {
        assert_eq!(check_matches(&[A, A, A, B, B]), vec![0, 1, 2]);
    }

    #[test]
    fn test_run_in_middle() {
        assert_eq!(check_matches(&[A, A, B, B, B, A]), vec![2, 3, 4]);
    }

    #[test]
    fn test_alternating_has_no_run() {
        assert!(check_matches(&[A, B, A, B, A, B]).is_empty());
    }

    #[test]
    fn test_chain_extends_past_three() {
        assert_eq!(check_matches(&[A, A, A, A, B, B]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_two_adjacent_runs() {
        assert_eq!(check_matches(&[A, A, A, B, B, B]), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_run_after_lone_pair() {
        assert_eq!(check_matches(&[C, A, A, B, B, B]), vec![3, 4, 5]);
    }

    #[test]
    fn test_run_at_end() {
        assert_eq!(check_matches(&[B, A, B, A, A, A]), vec![3, 4, 5]);
    }

    #[test]
    fn test_whole_sequence() {
        assert_eq!(check_matches(&[A; 6]), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_short_sequences() {
        assert!(check_matches::<TileType>(&[]).is_empty());
        assert!(check_matches(&[A]).is_empty());
        assert!(check_matches(&[A, A]).is_empty());
        assert_eq!(check_matches(&[A, A, A]), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(check_matches(&[E, E, E, E]).is_empty());
        assert!(check_matches(&[A, A, E, A, A]).is_empty());
    }

    #[test]
    fn test_ineligible_tiles_break_runs() {
        let mut tiles = [Tile::new(A), Tile::new(A), Tile::new(A), Tile::new(B)];
        tiles[1].force_active(false);
        assert!(check_matches(&tiles).is_empty());

        let mut tiles = [Tile::new(A), Tile::new(A), Tile::new(A), Tile::new(A)];
        tiles[0].on_matched(1000);
        assert_eq!(check_matches(&tiles), vec![1, 2, 3]);
    }

    #[test]
    fn test_idempotent() {
        let cells = [A, A, B, B, B, A, A, A, C];
        let first = check_matches(&cells);
        let second = check_matches(&cells);
        assert_eq!(first, second);
        assert_eq!(first, vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_direction_does_not_matter() {
        let cells = [C, A, A, A, B, B, C, C, C, A];
        let forward = check_matches(&cells);

        let mut reversed = cells;
        reversed.reverse();
        let mut backward: Vec<usize> = check_matches(&reversed)
            .into_iter()
            .map(|i| cells.len() - 1 - i)
            .collect();
        backward.sort_unstable();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_row_variant_matches_vec_variant() {
        let row = [A, A, A, B, B, B];
        assert_eq!(check_row_matches(&row).as_slice(), &[0, 1, 2, 3, 4, 5]);

        let row = [A, B, B, B, C, C];
        assert_eq!(check_row_matches(&row).as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_agrees_with_brute_force() {
        let palette = [None, Some(A), Some(B), Some(C)];
        let mut rng = SimpleRng::new(2024);

        for _ in 0..2000 {
            let len = rng.next_range(16) as usize;
            // Small palette so runs are common
            let cells: Vec<Option<TileType>> = (0..len)
                .map(|_| palette[rng.next_range(palette.len() as u32) as usize])
                .collect();
            assert_eq!(check_matches(&cells), brute_force(&cells), "cells: {:?}", cells);
        }
    }
}
