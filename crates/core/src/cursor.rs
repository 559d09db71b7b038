//! Cursor - selects the left tile of a horizontal pair

use serde::{Deserialize, Serialize};

use crate::types::{Command, BOARD_COLUMNS, VISIBLE_ROWS};

pub const CURSOR_MIN_ROW: usize = 1;
pub const CURSOR_MAX_ROW: usize = VISIBLE_ROWS;
pub const CURSOR_MAX_COL: usize = BOARD_COLUMNS - 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { col: 2, row: 2 }
    }

    /// Apply a movement command. Returns true if the cursor moved.
    ///
    /// `row_count` caps upward movement at the top of the stack.
    pub fn apply(&mut self, command: Command, row_count: usize) -> bool {
        let before = *self;
        match command {
            Command::MoveLeft => self.col = self.col.saturating_sub(1),
            Command::MoveRight => self.col = (self.col + 1).min(CURSOR_MAX_COL),
            Command::MoveDown => self.row = self.row.saturating_sub(1).max(CURSOR_MIN_ROW),
            Command::MoveUp => {
                let top = row_count.saturating_sub(1).clamp(CURSOR_MIN_ROW, CURSOR_MAX_ROW);
                if self.row < top {
                    self.row += 1;
                }
            }
            _ => {}
        }
        *self != before
    }

    /// Follow the stack up when a row is inserted underneath
    pub fn on_row_spawned(&mut self) {
        self.row = (self.row + 1).min(CURSOR_MAX_ROW);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let cursor = Cursor::new();
        assert_eq!((cursor.col, cursor.row), (2, 2));
    }

    #[test]
    fn test_horizontal_clamps() {
        let mut cursor = Cursor::new();
        for _ in 0..10 {
            cursor.apply(Command::MoveLeft, 12);
        }
        assert_eq!(cursor.col, 0);
        assert!(!cursor.apply(Command::MoveLeft, 12));

        for _ in 0..10 {
            cursor.apply(Command::MoveRight, 12);
        }
        assert_eq!(cursor.col, 4);
    }

    #[test]
    fn test_vertical_clamps() {
        let mut cursor = Cursor::new();
        for _ in 0..10 {
            cursor.apply(Command::MoveDown, 12);
        }
        assert_eq!(cursor.row, 1);

        for _ in 0..20 {
            cursor.apply(Command::MoveUp, 20);
        }
        assert_eq!(cursor.row, VISIBLE_ROWS);
    }

    #[test]
    fn test_move_up_stops_at_top_row() {
        let mut cursor = Cursor::new();
        // Rows 0..=3: the top row is 3
        assert!(cursor.apply(Command::MoveUp, 4));
        assert!(!cursor.apply(Command::MoveUp, 4));
        assert_eq!(cursor.row, 3);
    }

    #[test]
    fn test_non_movement_commands_are_ignored() {
        let mut cursor = Cursor::new();
        assert!(!cursor.apply(Command::Swap, 12));
        assert!(!cursor.apply(Command::TogglePause, 12));
    }

    #[test]
    fn test_row_spawn_pushes_cursor_up() {
        let mut cursor = Cursor::new();
        cursor.on_row_spawned();
        assert_eq!(cursor.row, 3);

        cursor.row = VISIBLE_ROWS;
        cursor.on_row_spawned();
        assert_eq!(cursor.row, VISIBLE_ROWS);
    }
}
