use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::scoring::{format_combo, format_score};
use crate::types::{TileView, BOARD_COLUMNS};

/// Owned copy of everything a consumer can observe after a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Bottom row first
    pub rows: Vec<[TileView; BOARD_COLUMNS]>,
    pub score: u32,
    pub combo: u32,
    pub scroll_offset: u32,
    pub cursor: Cursor,
    pub paused: bool,
    pub scroll_paused: bool,
    pub game_over: bool,
    pub tick_count: u64,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows.clear();
        self.score = 0;
        self.combo = 1;
        self.scroll_offset = 0;
        self.cursor = Cursor::new();
        self.paused = false;
        self.scroll_paused = false;
        self.game_over = false;
        self.tick_count = 0;
        self.seed = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn score_label(&self) -> String {
        format_score(self.score)
    }

    pub fn combo_label(&self) -> String {
        format_combo(self.combo)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            rows: Vec::new(),
            score: 0,
            combo: 1,
            scroll_offset: 0,
            cursor: Cursor::new(),
            paused: false,
            scroll_paused: false,
            game_over: false,
            tick_count: 0,
            seed: 0,
        };
        s.clear();
        s
    }
}
