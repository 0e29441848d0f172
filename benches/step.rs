//! Operator application throughput.
//!
//! Run with: cargo bench --bench step

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stakeholder_sim::games::city_without_walls as city;
use stakeholder_sim::games::coverage_clash as clash;
use stakeholder_sim::{CityWithoutWalls, CoverageClash, GameRng, Ruleset, Session, State};

/// Play `steps` random operators from the initial state.
fn random_playout<R: Ruleset>(game: &R, seed: u64, steps: u32) -> State {
    let mut session = Session::seeded(seed);
    let mut chooser = GameRng::new(seed ^ 0x5eed);
    let mut state = game.initial_state();
    for _ in 0..steps {
        let legal = game.legal_operators(&state);
        let Some(&op) = chooser.choose(&legal) else {
            break;
        };
        state = game.apply(&mut session, &state, op).unwrap();
    }
    state
}

fn bench_apply(c: &mut Criterion) {
    let clash_game = CoverageClash::new();
    let clash_state = clash_game.initial_state();
    c.bench_function("coverage_clash/apply", |b| {
        let mut session = Session::seeded(1);
        b.iter(|| {
            clash_game
                .apply(&mut session, black_box(&clash_state), clash::MANDATE_COVERAGE)
                .unwrap()
        })
    });

    let city_game = CityWithoutWalls::new();
    let city_state = city_game.initial_state();
    c.bench_function("city_without_walls/apply", |b| {
        let mut session = Session::seeded(1);
        b.iter(|| {
            city_game
                .apply(&mut session, black_box(&city_state), city::NEIGHBORHOOD_OUTREACH)
                .unwrap()
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let game = CityWithoutWalls::new();
    let state = random_playout(&game, 7, 20);
    c.bench_function("city_without_walls/successor", |b| {
        b.iter(|| black_box(&state).successor())
    });
}

fn bench_playout(c: &mut Criterion) {
    let game = CoverageClash::new();
    c.bench_function("coverage_clash/playout_50", |b| {
        b.iter(|| random_playout(&game, black_box(11), 50))
    });
}

criterion_group!(benches, bench_apply, bench_snapshot, bench_playout);
criterion_main!(benches);
