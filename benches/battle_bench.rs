use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

use frontline::battle::{Battle, BattleRules};
use frontline::board::{Board, RegionId, Side, TroopCounts};
use frontline::movegen::legal_actions;
use frontline::presentation::NullPresentation;
use frontline::simulate::{run_simulation, SimulationConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn id(name: &str) -> RegionId {
    name.parse().unwrap()
}

/// e4 against e5 with a large, mixed force on each side.
fn big_matchup() -> (Board, Battle, SmallRng) {
    let mut board = Board::standard(true);
    board.place(id("e4"), Side::Blufor, TroopCounts::new(20_000, 60, 120));
    board.place(id("e5"), Side::Opfor, TroopCounts::new(18_000, 50, 100));
    let mut rng = SmallRng::seed_from_u64(42);
    let mut battle = Battle::new(1, &board, id("e4"), id("e5"), BattleRules::default(), &mut rng).unwrap();
    battle.start(&mut rng).unwrap();
    (board, battle, rng)
}

fn bench_single_tick(c: &mut Criterion) {
    c.bench_function("battle_single_tick", |b| {
        b.iter_batched(
            big_matchup,
            |(mut board, mut battle, mut rng)| {
                battle
                    .advance_one_tick(black_box(&mut board), &mut rng, &mut NullPresentation)
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_battle(c: &mut Criterion) {
    c.bench_function("battle_to_completion", |b| {
        b.iter_batched(
            big_matchup,
            |(mut board, mut battle, mut rng)| {
                battle
                    .run_to_completion(black_box(&mut board), &mut rng, &mut NullPresentation)
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let board = Board::standard(true);
    c.bench_function("legal_actions_opening", |b| {
        b.iter(|| legal_actions(black_box(&board), Side::Blufor, &[]))
    });
}

fn bench_simulation(c: &mut Criterion) {
    let config = SimulationConfig {
        battles: 64,
        threads: 4,
        seed: 7,
        ..SimulationConfig::default()
    };
    let mut group = c.benchmark_group("simulation");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);
    group.bench_function("64_battles_4_threads", |b| {
        b.iter(|| run_simulation(black_box(&config)).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_tick,
    bench_full_battle,
    bench_legal_actions,
    bench_simulation,
);
criterion_main!(benches);
