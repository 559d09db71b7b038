use criterion::{black_box, criterion_group, criterion_main, Criterion};
use puzzle_league::core::{check_matches, gravity, Grid, SimConfig, Simulation};
use puzzle_league::types::TileType::{Blue as B, Empty as E, Green as G, Pink as P, Red as R, Yellow as Y};
use puzzle_league::types::TICK_MS;

fn bench_tick(c: &mut Criterion) {
    let config = SimConfig {
        initial_rows: 10,
        max_rows: None,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config, 12345).unwrap();

    c.bench_function("simulation_tick_16ms", |b| {
        b.iter(|| {
            sim.tick(black_box(TICK_MS));
            sim.take_events();
        })
    });
}

fn bench_match_scan(c: &mut Criterion) {
    let column = [R, R, G, G, G, B, Y, Y, Y, Y, P, R, B];

    c.bench_function("check_matches_13", |b| {
        b.iter(|| check_matches(black_box(&column)))
    });
}

fn bench_gravity_pass(c: &mut Criterion) {
    let config = SimConfig::default();
    let rows = [
        [R, G, B, Y, P, R],
        [E, E, E, E, E, E],
        [G, B, Y, P, R, G],
        [B, Y, P, R, G, B],
        [Y, P, R, G, B, Y],
    ];

    c.bench_function("gravity_pass", |b| {
        b.iter(|| {
            let mut grid = Grid::from_types(&config, black_box(&rows));
            gravity::apply(&mut grid)
        })
    });
}

criterion_group!(benches, bench_tick, bench_match_scan, bench_gravity_pass);
criterion_main!(benches);
