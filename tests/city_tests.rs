//! City Without Walls scenarios.

use stakeholder_sim::core::{NullSink, ScriptedRandom};
use stakeholder_sim::games::city_without_walls::*;
use stakeholder_sim::{CityWithoutWalls, Ruleset, Session, State};

/// Spring, so winter exposure stays out of the numbers.
fn spring(game: &CityWithoutWalls, role: stakeholder_sim::RoleId) -> State {
    game.initial_state().with_season(1).with_active_role(role)
}

#[test]
fn test_population_moves_conserve_total() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);

    let state = spring(&game, MEDICAL).with_round(3);
    let next = game.apply(&mut session, &state, MOBILE_OUTREACH).unwrap();
    // 8% of 4,500 moved indoors.
    assert_eq!(next.metric(UNSHELTERED), 4_140);
    assert_eq!(next.metric(SHELTERED), 4_160);
    assert_eq!(next.metric(HOMELESS_TOTAL), BASELINE_HOMELESS);
    assert_eq!(next.metric(TRUST), 54);
}

#[test]
fn test_housing_navigation_places_people() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);

    let state = spring(&game, SHELTERS).with_round(4);
    let next = game.apply(&mut session, &state, HOUSING_NAVIGATION).unwrap();
    assert_eq!(next.metric(SHELTERED), 2_850);
    assert_eq!(next.metric(PLACEMENTS), 950);
    assert_eq!(next.metric(HOMELESS_TOTAL), BASELINE_HOMELESS - 950);
    assert_eq!(next.metric(WAITLIST), 360);
    assert_eq!(next.metric(SHELTER_BUDGET), 380_000);
    assert_eq!(next.metric(SHELTER_INFLUENCE), 40);
    assert_eq!(next.history().back(), Some(&(BASELINE_HOMELESS - 950)));
}

#[test]
fn test_round_gates() {
    let game = CityWithoutWalls::new();
    let early = spring(&game, SHELTERS).with_round(1);
    let late = spring(&game, SHELTERS)
        .with_round(11)
        .with_metric(COORDINATION, 60);

    assert!(!game.catalog().is_legal(&early, HOUSING_NAVIGATION));
    assert!(!game.catalog().is_legal(&early, SUPPORTIVE_HOUSING));
    assert!(game.catalog().is_legal(&early, EXPAND_SHELTER));
    assert!(game.catalog().is_legal(&late, SUPPORTIVE_HOUSING));
}

#[test]
fn test_pilot_failure_branch() {
    let game = CityWithoutWalls::new();
    let mut session = Session::new(ScriptedRandom::always(false), NullSink);
    let state = spring(&game, UNIVERSITY)
        .with_round(7)
        .with_metric(RESEARCH_FUNDING, 200_000);

    let next = game.apply(&mut session, &state, PILOT_INTERVENTION).unwrap();
    assert!(next.flag(PILOT_LAUNCHED));
    assert_eq!(next.metric(REPUTATION), 70);
    assert_eq!(next.metric(ENGAGEMENT), 48);
    assert_eq!(next.metric(UNSHELTERED), 4_500);
    assert_eq!(next.metric(RESEARCH_FUNDING), 50_000);
    assert_eq!(next.metric(PUBLICATIONS), 0);
}

#[test]
fn test_clinic_overload_burns_out_staff() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);
    let state = spring(&game, MEDICAL).with_metric(PATIENT_VOLUME, 230);

    let next = game.apply(&mut session, &state, MEDICAL_HOLD).unwrap();
    assert_eq!(next.metric(BURNOUT), 38);
}

#[test]
fn test_summer_heat_hurts_health() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);
    let state = game.initial_state().with_season(SUMMER);

    let next = game.apply(&mut session, &state, NEIGHBORHOODS_HOLD).unwrap();
    assert_eq!(next.metric(HEALTH), 36);
}

#[test]
fn test_history_window_is_bounded() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);
    let mut state = spring(&game, SHELTERS).with_round(4);

    // Volunteer drives keep lowering the total while support holds up.
    for _ in 0..40 {
        if game.is_terminal(&state) {
            break;
        }
        let op = if state.active_role() == SHELTERS
            && game.catalog().is_legal(&state, VOLUNTEER_DRIVE)
        {
            VOLUNTEER_DRIVE
        } else {
            game.catalog()
                .for_role(state.active_role())
                .find(|def| def.name == "Hold Position")
                .map(|def| def.id)
                .unwrap()
        };
        state = game.apply(&mut session, &state, op).unwrap();
        assert!(state.history().len() <= 12);
    }
}

#[test]
fn test_observer_view() {
    let game = CityWithoutWalls::new();
    let state = game.initial_state();

    let view = game.render_text(&state, OBSERVER);
    assert!(view.contains("Round 1 | Winter | Step 0"));
    assert!(view.contains("  Total Homeless: 10,700"));
    assert!(view.contains("  Neighborhoods Budget: $750,000"));
    assert!(view.contains("  Housing Affordability: 38.5%"));
    assert!(view.contains("Waiting for Neighborhoods Coalition."));
    assert!(!view.contains("GOAL:"));

    let shelters = game.render_text(&state, SHELTERS);
    assert!(shelters.contains("- GOAL: Waitlist < 150 (currently 420)"));
}

#[test]
fn test_private_security_moves_people_out_of_sight() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);
    let state = spring(&game, NEIGHBORHOODS);

    let next = game.apply(&mut session, &state, PRIVATE_SECURITY).unwrap();
    // 15% of 4,500
    assert_eq!(next.metric(UNSHELTERED), 3_825);
    assert_eq!(next.metric(HOMELESS_TOTAL), BASELINE_HOMELESS - 675);
    assert_eq!(next.metric(SAFETY), 57);
    assert_eq!(next.metric(TRUST), 32);
    assert!(next
        .narrative()
        .iter()
        .any(|e| e.text == "Visible homelessness reduced by 675 (displaced to other zones)."));
}

#[test]
fn test_housing_narration_matches_people_moved() {
    let game = CityWithoutWalls::new();
    let mut session = Session::seeded(1);

    let respite = spring(&game, MEDICAL).with_metric(SHELTERED, 100);
    let next = game.apply(&mut session, &respite, MEDICAL_RESPITE).unwrap();
    assert_eq!(next.metric(SHELTERED), 0);
    assert!(next
        .narrative()
        .iter()
        .any(|e| e.text == "100 people transitioned to housing through medical respite."));

    let psh = spring(&game, SHELTERS)
        .with_round(11)
        .with_metric(COORDINATION, 60)
        .with_metric(SHELTERED, 10);
    let next = game.apply(&mut session, &psh, SUPPORTIVE_HOUSING).unwrap();
    assert_eq!(next.metric(SHELTERED), 0);
    assert_eq!(next.metric(UNSHELTERED), 4_475);
    assert_eq!(next.metric(PLACEMENTS), 35);
    assert!(next.narrative().iter().any(|e| e
        .text
        .starts_with("35 chronically homeless individuals housed")));
}
