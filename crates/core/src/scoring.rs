//! Scoring module - per-tile points scaled by the combo multiplier
//!
//! A confirmed match is worth `tiles * points_per_tile * combo`. The running
//! score is clamped to a display ceiling. The combo starts at 1, grows by one
//! for every chain reaction and falls back to 1 once the board has been calm
//! for long enough.

/// Points for one match pass
pub fn points_for_match(tiles: usize, points_per_tile: u32, combo: u32) -> u32 {
    let tiles = u32::try_from(tiles).unwrap_or(u32::MAX);
    tiles
        .saturating_mul(points_per_tile)
        .saturating_mul(combo.max(1))
}

/// Add `points` to `score`, clamped to `max_score`
pub fn apply_points(score: u32, points: u32, max_score: u32) -> u32 {
    score.saturating_add(points).min(max_score)
}

/// Thousands-separated score, e.g. `1,234,567`
pub fn format_score(score: u32) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Combo multiplier label, e.g. `3x`
pub fn format_combo(combo: u32) -> String {
    format!("{combo}x")
}

/// Running score and combo multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    combo: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self { score: 0, combo: 1 }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Chain reaction: raise the multiplier and return the new value
    pub fn bump_combo(&mut self) -> u32 {
        self.combo = self.combo.saturating_add(1);
        self.combo
    }

    /// Back to 1. Returns true if the value changed.
    pub fn reset_combo(&mut self) -> bool {
        let changed = self.combo != 1;
        self.combo = 1;
        changed
    }

    /// Score `tiles` matched tiles at the current combo.
    ///
    /// Returns the new total if it changed.
    pub fn award(&mut self, tiles: usize, points_per_tile: u32, max_score: u32) -> Option<u32> {
        let points = points_for_match(tiles, points_per_tile, self.combo);
        let total = apply_points(self.score, points, max_score);
        if total == self.score {
            return None;
        }
        self.score = total;
        Some(total)
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}
