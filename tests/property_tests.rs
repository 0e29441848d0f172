//! Randomized play-throughs checking the engine's structural guarantees.

use proptest::prelude::*;

use stakeholder_sim::core::FlagKind;
use stakeholder_sim::{CityWithoutWalls, CoverageClash, GameRng, Ruleset, Session, State};

/// Play up to `steps` random operators, checking every transition.
fn check_random_play<R: Ruleset>(game: &R, seed: u64, steps: u32) -> Result<(), TestCaseError> {
    let config = game.config();
    let mut session = Session::seeded(seed);
    let mut chooser = GameRng::new(seed.rotate_left(17));
    let mut state = game.initial_state();
    prop_assert!(state.check_invariants(config).is_ok());

    for _ in 0..steps {
        let legal = game.legal_operators(&state);
        if game.is_terminal(&state) {
            prop_assert!(legal.is_empty());
            break;
        }
        prop_assert!(!legal.is_empty(), "non-terminal state with no legal operator");

        let Some(&op) = chooser.choose(&legal) else {
            break;
        };
        let before = state.clone();
        let next = game.apply(&mut session, &state, op).unwrap();

        // The predecessor is never modified.
        prop_assert_eq!(&state, &before);

        prop_assert!(next.check_invariants(config).is_ok(), "{:?}", next.check_invariants(config));
        for metric in &config.metrics {
            prop_assert!(metric.bounds.contains(next.metric(metric.id)), "{} out of bounds", metric.name);
            if metric.cumulative {
                prop_assert!(next.metric(metric.id) >= state.metric(metric.id));
            }
        }
        for flag in &config.flags {
            if flag.kind == FlagKind::Latch && state.flag(flag.id) {
                prop_assert!(next.flag(flag.id), "latch {} reverted", flag.name);
            }
        }

        prop_assert_eq!(next.step(), state.step() + 1);
        prop_assert!(next.round() >= state.round());
        if next.season() != state.season() {
            prop_assert!(next.round() > state.round());
        }
        if !next.is_terminal() {
            prop_assert!(config.roster.is_acting(next.active_role()));
        }

        let first = game.outcome(&next);
        prop_assert_eq!(game.outcome(&next), first);

        state = next;
    }
    Ok(())
}

fn assert_terminal_is_sticky<R: Ruleset>(game: &R, state: &State) -> Result<(), TestCaseError> {
    if game.is_terminal(state) {
        prop_assert!(state.is_terminal());
        prop_assert!(game.legal_operators(state).is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_coverage_clash_random_play(seed in any::<u64>(), steps in 1u32..120) {
        check_random_play(&CoverageClash::new(), seed, steps)?;
    }

    #[test]
    fn prop_city_random_play(seed in any::<u64>(), steps in 1u32..150) {
        check_random_play(&CityWithoutWalls::new(), seed, steps)?;
    }

    #[test]
    fn prop_settled_outcome_is_sticky(seed in any::<u64>()) {
        let game = CoverageClash::new();
        let mut session = Session::seeded(seed);
        let mut chooser = GameRng::new(seed ^ 0xabcd);
        let mut state = game.initial_state();
        while !game.is_terminal(&state) && state.step() < 400 {
            let legal = game.legal_operators(&state);
            let Some(&op) = chooser.choose(&legal) else { break };
            state = game.apply(&mut session, &state, op).unwrap();
        }
        assert_terminal_is_sticky(&game, &state)?;
    }
}
