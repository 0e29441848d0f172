//! Terminal conditions, legality and rejection of illegal operators.

use stakeholder_sim::core::{EntryKind, NullSink, ScriptedRandom};
use stakeholder_sim::games::city_without_walls as city;
use stakeholder_sim::games::coverage_clash as clash;
use stakeholder_sim::{
    CityWithoutWalls, CoverageClash, EngineError, GameResult, OperatorId, Rejection, Ruleset,
    Session,
};

/// Profit one operator short of the target: raising premiums wins it.
#[test]
fn test_insurer_reaches_profit_target() {
    let game = CoverageClash::new();
    let mut session = Session::seeded(1);
    let state = game
        .initial_state()
        .with_active_role(clash::INSURER)
        .with_metric(clash::PROFIT, 80);
    assert!(!game.is_terminal(&state));

    let next = game.apply(&mut session, &state, clash::RAISE_PREMIUMS).unwrap();
    assert_eq!(next.metric(clash::PROFIT), 86);
    assert!(game.is_terminal(&next));

    let outcome = next.result().cloned().unwrap();
    assert_eq!(outcome.result, GameResult::Winner(clash::INSURER));
    assert_eq!(outcome.message, "Insurance Company wins! Profit target achieved.");
    assert_eq!(game.outcome(&next), Some(outcome));
    assert_eq!(
        next.narrative().last().map(|e| e.kind),
        Some(EntryKind::Outcome)
    );
}

/// A terminal state accepts nothing and its outcome never changes.
#[test]
fn test_terminal_state_is_frozen() {
    let game = CoverageClash::new();
    let mut session = Session::seeded(1);
    let state = game
        .initial_state()
        .with_active_role(clash::INSURER)
        .with_metric(clash::PROFIT, 80);
    let over = game.apply(&mut session, &state, clash::RAISE_PREMIUMS).unwrap();

    assert!(game.legal_operators(&over).is_empty());
    let err = game.apply(&mut session, &over, clash::INSURER_PASS).unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::GameOver));

    let first = game.outcome(&over);
    assert_eq!(game.outcome(&over), first);
    assert!(game.is_terminal(&over));
    assert!(game.is_terminal(&over));
}

/// A state that already meets a goal is over even before its result is
/// stored, and `apply` agrees with `legal_operators`.
#[test]
fn test_unsettled_goal_state_rejects_operators() {
    let game = CoverageClash::new();
    let mut session = Session::seeded(1);
    let state = game
        .initial_state()
        .with_active_role(clash::INSURER)
        .with_metric(clash::PROFIT, 90);
    assert!(state.result().is_none());

    assert!(game.is_terminal(&state));
    assert!(game.legal_operators(&state).is_empty());
    let err = game.apply(&mut session, &state, clash::INSURER_PASS).unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::GameOver));
    assert_eq!(
        game.apply(&mut session, &state, OperatorId::new(99)).unwrap_err(),
        EngineError::UnknownOperator(OperatorId::new(99))
    );
    assert_eq!(state.step(), 0);
}

#[test]
fn test_illegal_operators_are_rejected() {
    let game = CoverageClash::new();
    let mut session = Session::seeded(1);
    let state = game.initial_state().with_metric(clash::BUDGET, 15);

    let err = game
        .apply(&mut session, &state, clash::EXPAND_PUBLIC_COVERAGE)
        .unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::PreconditionFailed));

    let err = game.apply(&mut session, &state, clash::RISK_SELECTION).unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::NotYourTurn {
            active: clash::POLICY_MAKER
        })
    );

    let err = game.apply(&mut session, &state, OperatorId::new(99)).unwrap_err();
    assert_eq!(err, EngineError::UnknownOperator(OperatorId::new(99)));

    // The predecessor is untouched by failed applications.
    assert_eq!(state.step(), 0);
    assert_eq!(state.metric(clash::BUDGET), 15);
}

#[test]
fn test_first_matching_goal_wins() {
    let game = CoverageClash::new();
    // Uninsured collapse and low trust both match; collapse comes first.
    let state = game
        .initial_state()
        .with_metric(clash::UNINSURED, 200)
        .with_metric(clash::TRUST, 20);
    assert_eq!(game.outcome(&state).unwrap().result, GameResult::NoWinner);

    let state = game.initial_state().with_metric(clash::TRUST, 20);
    assert_eq!(
        game.outcome(&state).unwrap().result,
        GameResult::Winner(clash::INSURER)
    );
}

/// Winter deaths end the game for everyone, whatever else looks good.
#[test]
fn test_winter_deaths_end_the_city() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(9);
    let mut state = game.initial_state().with_metric(city::PUBLIC_SUPPORT, 90);

    let holds = [
        city::NEIGHBORHOODS_HOLD,
        city::BUSINESS_HOLD,
        city::MEDICAL_HOLD,
        city::SHELTERS_HOLD,
        city::UNIVERSITY_HOLD,
    ];
    let mut steps = 0;
    while !game.is_terminal(&state) {
        let op = holds[state.active_role().index()];
        state = game.apply(&mut session, &state, op).unwrap();
        steps += 1;
        assert!(steps < 20, "game should have ended");
    }

    // 9 deaths per step with 4,500 people outside.
    assert_eq!(steps, 6);
    assert_eq!(state.metric(city::DEATHS), 54);
    let outcome = game.outcome(&state).unwrap();
    assert_eq!(outcome.result, GameResult::NoWinner);
    assert!(outcome.message.starts_with("HUMANITARIAN CRISIS"));
}

/// A stakeholder out of influence pays nothing, gets only the shortfall
/// effects, and still passes the turn.
#[test]
fn test_influence_shortfall_advances_turn() {
    let game = CityWithoutWalls::new();
    let mut session = Session::new(ScriptedRandom::always(true), NullSink);
    let state = game
        .initial_state()
        .with_season(1)
        .with_metric(city::NEIGH_INFLUENCE, 5);

    let next = game.apply(&mut session, &state, city::MEDIA_CAMPAIGN).unwrap();

    assert_eq!(next.active_role(), city::BUSINESS);
    assert_eq!(next.step(), 1);
    assert_eq!(next.metric(city::NEIGH_BUDGET), 750_000);
    assert_eq!(next.metric(city::NEIGH_INFLUENCE), 5);
    assert_eq!(next.metric(city::STIGMA), 68);
    assert_eq!(next.metric(city::UNSHELTERED), 4_500);
    assert_eq!(next.metric(city::PUBLIC_SUPPORT), 49);

    let texts: Vec<_> = next.narrative().iter().map(|e| e.text.as_str()).collect();
    assert!(texts.contains(&"Failed: insufficient neighborhoods influence."));
    assert!(next
        .narrative()
        .iter()
        .filter(|e| e.kind == EntryKind::Shortfall)
        .any(|e| e.text == "Public Support decreased to 49%."));
}

#[test]
fn test_city_final_round_scores() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(2);
    let state = game
        .initial_state()
        .with_season(3)
        .with_round(city::FINAL_ROUND)
        .with_active_role(city::UNIVERSITY);
    assert!(!game.is_terminal(&state));

    // The last stakeholder closes round 24.
    let next = game.apply(&mut session, &state, city::UNIVERSITY_HOLD).unwrap();
    assert_eq!(next.round(), city::FINAL_ROUND + 1);
    let outcome = game.outcome(&next).unwrap();
    assert_eq!(outcome.result, GameResult::NoWinner);
    assert!(outcome.message.starts_with("FAILURE"));
}
