//! Simulation driver - owns the grid and runs one tick at a time
//!
//! Per tick, in this order:
//!
//! 1. drain queued commands (cursor moves, swaps, external pause)
//! 2. scroll timer: raise the stack, spawn rows, check top-out
//! 3. tile lifecycles (Removed tiles become Empty), then tile movement
//! 4. gravity pass
//! 5. match pass over dirty rows and columns
//! 6. match reaction: combo, `on_matched`, score, scroll pause
//! 7. pause timer: resume scrolling once the board is stale
//! 8. combo-reset timer: runs only while the board is stale

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::config::SimConfig;
use crate::cursor::Cursor;
use crate::error::{fault, CoreError, CoreResult};
use crate::gravity;
use crate::grid::Grid;
use crate::rng::SimContext;
use crate::scoring::{format_combo, format_score, ScoreState};
use crate::scroll::ScrollScheduler;
use crate::snapshot::GameSnapshot;
use crate::timer::Countdown;
use crate::types::{Command, SimEvent, TileView, BOARD_COLUMNS};

#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    ctx: SimContext,
    grid: Grid,
    scroll: ScrollScheduler,
    pause_timer: Countdown,
    combo_timer: Countdown,
    score: ScoreState,
    cursor: Cursor,
    commands: VecDeque<Command>,
    /// Events since the last `take_events` (consumed by observers).
    events: Vec<SimEvent>,
    /// A player swap happened since the last match was found.
    swapped_since_check: bool,
    /// Gravity moved something since the last match was found.
    chain_armed: bool,
    paused: bool,
    game_over: bool,
}

impl Simulation {
    /// Create a simulation and spawn `config.initial_rows` random rows
    pub fn new(config: SimConfig, seed: u32) -> CoreResult<Self> {
        let grid = Grid::new(&config);
        let mut sim = Self::with_grid(config, seed, grid)?;
        for _ in 0..sim.config.initial_rows {
            let kinds = sim.ctx.draw_row();
            sim.grid.add_row_at_bottom(kinds, 0);
        }
        sim.grid.snap_to_slots(0);
        Ok(sim)
    }

    /// Start from a prepared grid (scripted boards, replays, tests)
    pub fn with_grid(config: SimConfig, seed: u32, grid: Grid) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            ctx: SimContext::new(seed),
            scroll: ScrollScheduler::new(&config),
            pause_timer: Countdown::one_shot(config.pause_ms),
            combo_timer: Countdown::recurring(config.combo_reset_ms),
            score: ScoreState::new(),
            cursor: Cursor::new(),
            commands: VecDeque::new(),
            events: Vec::new(),
            swapped_since_check: false,
            chain_armed: false,
            paused: false,
            game_over: false,
            grid,
            config,
        })
    }

    // ----- queries --------------------------------------------------------

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_at(&self, row: usize, col: usize) -> CoreResult<TileView> {
        self.grid
            .get(row, col)
            .map(|tile| tile.view())
            .ok_or(CoreError::OutOfRange { row, col })
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    pub fn score_label(&self) -> String {
        format_score(self.score.score())
    }

    pub fn combo_label(&self) -> String {
        format_combo(self.score.combo())
    }

    pub fn scroll_offset(&self) -> u32 {
        self.scroll.offset()
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Externally paused (menu)
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Scrolling held back after a match
    pub fn scroll_paused(&self) -> bool {
        self.scroll.is_paused()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn board_is_stale(&self) -> bool {
        self.grid.is_stale()
    }

    pub fn tick_count(&self) -> u64 {
        self.ctx.tick_count()
    }

    pub fn seed(&self) -> u32 {
        self.ctx.seed()
    }

    /// Drain buffered events, oldest first
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows.clear();
        out.rows.extend(self.grid.rows().iter().map(|row| {
            let mut views = [TileView::default(); BOARD_COLUMNS];
            for (view, tile) in views.iter_mut().zip(row.tiles().iter()) {
                *view = tile.view();
            }
            views
        }));
        out.score = self.score.score();
        out.combo = self.score.combo();
        out.scroll_offset = self.scroll.offset();
        out.cursor = self.cursor;
        out.paused = self.paused;
        out.scroll_paused = self.scroll.is_paused();
        out.game_over = self.game_over;
        out.tick_count = self.ctx.tick_count();
        out.seed = self.ctx.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    // ----- commands -------------------------------------------------------

    /// Queue a command for the start of the next tick
    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Queue a swap of `(col, row)` with `(col + 1, row)`.
    ///
    /// Returns false, queuing nothing, if the pair is off the board.
    pub fn request_swap(&mut self, col: usize, row: usize) -> bool {
        if col + 1 >= BOARD_COLUMNS || row >= self.grid.row_count() {
            trace!(col, row, "swap request out of range");
            return false;
        }
        self.commands.push_back(Command::SwapAt { col, row });
        true
    }

    fn apply_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            if command == Command::TogglePause {
                if !self.game_over {
                    self.paused = !self.paused;
                    debug!(paused = self.paused, "external pause toggled");
                }
                continue;
            }
            if self.paused || self.game_over {
                continue;
            }

            match command {
                Command::Swap => self.try_swap(self.cursor.col, self.cursor.row),
                Command::SwapAt { col, row } => self.try_swap(col, row),
                _ => {
                    self.cursor.apply(command, self.grid.row_count());
                }
            }
        }
    }

    fn try_swap(&mut self, col: usize, row: usize) {
        match self.grid.swap(row, col) {
            Ok(()) => {
                self.swapped_since_check = true;
                trace!(col, row, "swapped");
            }
            Err(err) => trace!(%err, "swap ignored"),
        }
    }

    // ----- tick -----------------------------------------------------------

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Returns false without simulating while paused or after game over;
    /// queued commands are still consumed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.apply_commands();
        if self.paused || self.game_over {
            return false;
        }
        self.ctx.advance(elapsed_ms);

        let spawns = self.scroll.advance(elapsed_ms);
        for _ in 0..spawns {
            self.spawn_row();
            if self.game_over {
                return true;
            }
        }

        self.grid.advance_lifecycles(elapsed_ms, self.config.fade_step);
        self.grid.animate(self.scroll.offset(), self.config.tile_max_step);
        if let Err(err) = self.grid.check_invariants() {
            fault(&err);
            self.grid.normalize_removed();
        }

        if gravity::apply(&mut self.grid) > 0 {
            self.chain_armed = true;
        }

        let matches = self.grid.collect_matches();
        let found = !matches.is_empty();
        if found {
            self.on_matches(&matches);
        }

        let stale = self.grid.is_stale();
        if stale && !found {
            self.chain_armed = false;
        }

        if self.pause_timer.advance(elapsed_ms) > 0 {
            if stale {
                self.scroll.resume();
                debug!(tick = self.ctx.tick_count(), "scroll resumed");
            } else {
                self.pause_timer.restart();
            }
        }

        if stale {
            if self.combo_timer.advance(elapsed_ms) > 0 && self.score.reset_combo() {
                debug!("combo reset");
                self.events.push(SimEvent::ComboChanged(self.score.combo()));
            }
        } else {
            self.combo_timer.reset();
        }

        true
    }

    fn spawn_row(&mut self) {
        let kinds = self.ctx.draw_row();
        self.grid.add_row_at_bottom(kinds, self.scroll.offset());
        self.cursor.on_row_spawned();
        self.events.push(SimEvent::RowSpawned);
        debug!(rows = self.grid.row_count(), "row spawned");

        if let Some(max) = self.config.max_rows {
            if self.grid.row_count() > max {
                self.game_over = true;
                self.events.push(SimEvent::GameOver);
                debug!(score = self.score.score(), "stack topped out");
            }
        }
    }

    fn on_matches(&mut self, slots: &[(usize, usize)]) {
        if self.chain_armed && !self.swapped_since_check {
            let combo = self.score.bump_combo();
            self.events.push(SimEvent::ComboChanged(combo));
            debug!(combo, "chain");
        }
        self.chain_armed = false;
        self.swapped_since_check = false;

        let mut confirmed = 0;
        for &(row, col) in slots {
            let Some(tile) = self.grid.get_mut(row, col) else {
                continue;
            };
            if tile.on_matched(self.config.blink_ms) {
                confirmed += 1;
                self.events.push(SimEvent::TileMatched { row, col });
            }
        }

        let (per_tile, max_score) = (self.config.points_per_tile, self.config.max_score);
        if let Some(total) = self.score.award(confirmed, per_tile, max_score) {
            self.events.push(SimEvent::ScoreChanged(total));
        }
        debug!(tiles = confirmed, combo = self.score.combo(), "match");

        self.scroll.pause();
        self.pause_timer.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowActivation;
    use crate::types::TileType::{self, Blue as B, Empty as E, Green as G, Pink as P, Red as R, Yellow as Y};
    use crate::types::{Lifecycle, TICK_MS};

    fn config() -> SimConfig {
        SimConfig {
            row_activation: RowActivation::AllRows,
            max_rows: None,
            ..SimConfig::default()
        }
    }

    fn sim_with(rows: &[[TileType; BOARD_COLUMNS]]) -> Simulation {
        let config = config();
        let grid = Grid::from_types(&config, rows);
        Simulation::with_grid(config, 7, grid).unwrap()
    }

    #[test]
    fn test_new_simulation() {
        let sim = Simulation::new(SimConfig::default(), 1).unwrap();
        assert_eq!(sim.row_count(), 0);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.combo(), 1);
        assert_eq!(sim.cursor(), Cursor::new());
        assert!(!sim.paused());
        assert!(!sim.game_over());
        assert!(sim.board_is_stale());
    }

    #[test]
    fn test_initial_rows_are_full() {
        let config = SimConfig {
            initial_rows: 4,
            ..SimConfig::default()
        };
        let sim = Simulation::new(config, 99).unwrap();
        assert_eq!(sim.row_count(), 4);
        for row in 0..4 {
            for col in 0..BOARD_COLUMNS {
                let view = sim.tile_at(row, col).unwrap();
                assert!(!view.kind.is_empty());
                assert!(view.active);
            }
        }
        assert_eq!(sim.grid().get(3, 1).unwrap().position(), (54, 162));
        assert!(sim.board_is_stale());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            fade_step: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::new(config, 1),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tile_at_out_of_range() {
        let sim = sim_with(&[[R, G, B, Y, P, R]]);
        assert!(sim.tile_at(0, 5).is_ok());
        assert_eq!(
            sim.tile_at(1, 0),
            Err(CoreError::OutOfRange { row: 1, col: 0 })
        );
    }

    #[test]
    fn test_request_swap_range() {
        let mut sim = sim_with(&[[R, G, B, Y, P, R]]);
        assert!(sim.request_swap(0, 0));
        assert!(sim.request_swap(4, 0));
        assert!(!sim.request_swap(5, 0));
        assert!(!sim.request_swap(0, 1));
    }

    #[test]
    fn test_swap_applies_next_tick() {
        let mut sim = sim_with(&[[R, G, B, Y, P, R]]);
        assert!(sim.request_swap(0, 0));
        assert_eq!(sim.tile_at(0, 0).unwrap().kind, R);

        sim.tick(TICK_MS);
        assert_eq!(sim.tile_at(0, 0).unwrap().kind, G);
        assert_eq!(sim.tile_at(0, 1).unwrap().kind, R);
    }

    #[test]
    fn test_cursor_swap_command() {
        let mut sim = sim_with(&[[R, G, B, Y, P, R], [G, B, Y, P, R, G], [B, Y, P, R, G, B]]);
        sim.push_command(Command::Swap);
        sim.tick(TICK_MS);
        // Cursor starts at (col 2, row 2)
        assert_eq!(sim.tile_at(2, 2).unwrap().kind, R);
        assert_eq!(sim.tile_at(2, 3).unwrap().kind, P);
    }

    #[test]
    fn test_swap_creating_match_scores_and_pauses_scroll() {
        let mut sim = sim_with(&[[R, R, G, R, B, Y]]);
        sim.request_swap(2, 0);
        sim.tick(TICK_MS);
        sim.take_events();

        // Swapped tiles travel for a few ticks, then the run is found
        let mut ticks = 0;
        while sim.score() == 0 && ticks < 10 {
            sim.tick(TICK_MS);
            ticks += 1;
        }
        assert_eq!(sim.score(), 300);
        assert_eq!(sim.combo(), 1);
        assert!(sim.scroll_paused());

        for col in 0..3 {
            let view = sim.tile_at(0, col).unwrap();
            assert_eq!(view.kind, R);
            assert_eq!(view.lifecycle, Lifecycle::Blinking);
        }

        let events = sim.take_events();
        assert!(events.contains(&SimEvent::TileMatched { row: 0, col: 0 }));
        assert!(events.contains(&SimEvent::ScoreChanged(300)));
        assert!(!events.iter().any(|e| matches!(e, SimEvent::ComboChanged(_))));
    }

    #[test]
    fn test_matched_tiles_clear_and_scroll_resumes() {
        let mut sim = sim_with(&[[R, R, R, G, B, Y]]);
        sim.tick(TICK_MS);
        assert_eq!(sim.score(), 300);
        assert!(sim.scroll_paused());
        let offset = sim.scroll_offset();

        // Blink, fade and one pause retry: scrolling resumes on tick 126
        for _ in 0..140 {
            sim.tick(TICK_MS);
        }
        for col in 0..3 {
            assert!(sim.tile_at(0, col).unwrap().kind.is_empty());
        }
        assert!(!sim.scroll_paused());
        assert!(sim.scroll_offset() > offset);
    }

    #[test]
    fn test_external_pause_freezes_tick() {
        let mut sim = sim_with(&[[R, G, B, Y, P, R]]);
        sim.push_command(Command::TogglePause);
        assert!(!sim.tick(TICK_MS));
        assert!(sim.paused());
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.scroll_offset(), 0);

        // Commands other than the toggle are dropped while paused
        sim.request_swap(0, 0);
        sim.tick(TICK_MS);
        assert_eq!(sim.tile_at(0, 0).unwrap().kind, R);

        sim.push_command(Command::TogglePause);
        assert!(sim.tick(TICK_MS));
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn test_take_events_drains() {
        let mut sim = sim_with(&[[R, R, R, G, B, Y]]);
        sim.tick(TICK_MS);
        assert!(!sim.take_events().is_empty());
        assert!(sim.take_events().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut sim = sim_with(&[[R, G, B, Y, P, R], [E, E, B, E, E, E]]);
        sim.tick(TICK_MS);
        let snap = sim.snapshot();
        assert_eq!(snap.rows.len(), 2);
        assert_eq!(snap.rows[0][0].kind, R);
        assert_eq!(snap.rows[1][2].kind, B);
        assert_eq!(snap.scroll_offset, 1);
        assert_eq!(snap.tick_count, 1);
        assert_eq!(snap.seed, 7);
        assert_eq!(snap.combo_label(), "1x");
        assert!(snap.playable());
    }
}
