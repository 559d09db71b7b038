//! Headless simulation runner (default binary).
//!
//! Runs the core for a fixed number of ticks with a seeded random player and
//! prints the final snapshot as JSON on stdout. Logs go to stderr; set
//! `RUST_LOG=puzzle_league_core=debug` to follow spawns, matches and combos.
//!
//! Environment:
//! - `PUZZLE_SEED`: simulation seed (default 1)
//! - `PUZZLE_TICKS`: ticks to run (default 3600, one minute at 60 FPS)
//! - `PUZZLE_CONFIG`: path to a JSON `SimConfig`; missing fields use defaults
//! - `PUZZLE_AUTOPLAY`: `0`/`false` disables the random player

use std::env;
use std::fs;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use puzzle_league::core::{SimConfig, SimpleRng, Simulation};
use puzzle_league::types::{Command, SimEvent, TICK_MS};

/// One random command every this many ticks
const AUTOPLAY_EVERY: u64 = 6;

const AUTOPLAY_COMMANDS: [Command; 5] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::MoveUp,
    Command::MoveDown,
    Command::Swap,
];

#[derive(Debug, Clone)]
struct RunConfig {
    seed: u32,
    ticks: u64,
    config_path: Option<String>,
    autoplay: bool,
}

impl RunConfig {
    fn from_env() -> Self {
        let seed = env::var("PUZZLE_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let ticks = env::var("PUZZLE_TICKS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let config_path = env::var("PUZZLE_CONFIG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let autoplay = env::var("PUZZLE_AUTOPLAY")
            .map(|v| !(v == "0" || v.to_lowercase() == "false"))
            .unwrap_or(true);

        Self {
            seed,
            ticks,
            config_path,
            autoplay,
        }
    }

    fn sim_config(&self) -> Result<SimConfig> {
        let Some(path) = &self.config_path else {
            return Ok(SimConfig::default());
        };
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config: SimConfig =
            serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))?;
        Ok(config)
    }
}

#[derive(Debug, Default)]
struct Tally {
    matched: u64,
    rows: u64,
    best_combo: u32,
}

impl Tally {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::TileMatched { .. } => self.matched += 1,
            SimEvent::RowSpawned => self.rows += 1,
            SimEvent::ComboChanged(combo) => self.best_combo = self.best_combo.max(*combo),
            SimEvent::ScoreChanged(_) | SimEvent::GameOver => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let run = RunConfig::from_env();
    let config = run.sim_config()?;
    let mut sim = Simulation::new(config, run.seed).context("creating simulation")?;
    // Separate stream from the board's row draws
    let mut player = SimpleRng::new(run.seed ^ 0x5EED_CAFE);
    let mut tally = Tally::default();

    info!(seed = run.seed, ticks = run.ticks, autoplay = run.autoplay, "starting run");

    for tick in 0..run.ticks {
        if run.autoplay && tick % AUTOPLAY_EVERY == 0 {
            let pick = player.next_range(AUTOPLAY_COMMANDS.len() as u32) as usize;
            sim.push_command(AUTOPLAY_COMMANDS[pick]);
        }

        sim.tick(TICK_MS);
        for event in sim.take_events() {
            tally.record(&event);
        }

        if sim.game_over() {
            info!(tick, "game over");
            break;
        }
    }

    info!(
        score = %sim.score_label(),
        best_combo = tally.best_combo.max(1),
        tiles_matched = tally.matched,
        rows_spawned = tally.rows,
        "run finished"
    );

    let snapshot = sim.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
