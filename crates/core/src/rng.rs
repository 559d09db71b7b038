//! RNG module - deterministic tile draws
//!
//! Every random decision in the simulation goes through a [`SimContext`] that is
//! passed explicitly into the operations that need it. There is no global random
//! source, so a seed plus a command stream fully determines a game.

use crate::types::{TileType, BOARD_COLUMNS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Explicit simulation context: seeded randomness plus the time accumulator.
#[derive(Debug, Clone)]
pub struct SimContext {
    rng: SimpleRng,
    seed: u32,
    tick_count: u64,
    elapsed_ms: u64,
}

impl SimContext {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
            tick_count: 0,
            elapsed_ms: 0,
        }
    }

    /// Record one simulation step of `dt_ms`
    pub fn advance(&mut self, dt_ms: u32) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms as u64);
    }

    /// Draw a single non-Empty colour
    pub fn draw_color(&mut self) -> TileType {
        let idx = self.rng.next_range(TileType::COLORS.len() as u32) as usize;
        TileType::COLORS[idx]
    }

    /// Draw a full row of non-Empty colours
    pub fn draw_row(&mut self) -> [TileType; BOARD_COLUMNS] {
        let mut row = [TileType::Empty; BOARD_COLUMNS];
        for slot in &mut row {
            *slot = self.draw_color();
        }
        row
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_draw_row_never_empty() {
        let mut ctx = SimContext::new(7);
        for _ in 0..200 {
            let row = ctx.draw_row();
            assert!(row.iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn test_draw_color_covers_palette() {
        let mut ctx = SimContext::new(99);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let color = ctx.draw_color();
            let idx = TileType::COLORS.iter().position(|c| *c == color).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "every colour should appear");
    }

    #[test]
    fn test_context_advance() {
        let mut ctx = SimContext::new(3);
        ctx.advance(16);
        ctx.advance(16);
        assert_eq!(ctx.tick_count(), 2);
        assert_eq!(ctx.elapsed_ms(), 32);
        assert_eq!(ctx.seed(), 3);
    }
}
