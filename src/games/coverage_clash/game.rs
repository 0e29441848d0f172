//! Coverage Clash configuration, schedule and goals.

use crate::core::{
    Bounds, FlagConfig, FlagKind, GameConfig, GameResult, MetricConfig, Outcome, RoleConfig,
    RoleId, RoleRoster, State, Unit,
};
use crate::effects::Delta;
use crate::rules::{
    BonusRule, Cadence, Catalog, GoalEvaluator, GoalRule, PeriodicRule, Ruleset, ScheduleConfig,
};

use super::operators;
use super::*;

/// The Coverage Clash ruleset.
///
/// ## Example
///
/// ```
/// use stakeholder_sim::games::coverage_clash::{self, CoverageClash};
/// use stakeholder_sim::rules::Ruleset;
/// use stakeholder_sim::session::Session;
///
/// let game = CoverageClash::new();
/// let mut session = Session::seeded(7);
/// let state = game.initial_state();
///
/// let next = game
///     .apply(&mut session, &state, coverage_clash::MANDATE_COVERAGE)
///     .unwrap();
/// assert_eq!(next.metric(coverage_clash::BUDGET), 63);
/// assert_eq!(next.active_role(), coverage_clash::INSURER);
/// ```
#[derive(Clone, Debug)]
pub struct CoverageClash {
    config: GameConfig,
    schedule: ScheduleConfig,
    catalog: Catalog,
    goals: GoalEvaluator,
}

impl CoverageClash {
    /// Create the game with its standard starting values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: config(),
            schedule: schedule(),
            catalog: operators::catalog(),
            goals: goals(),
        }
    }
}

impl Default for CoverageClash {
    fn default() -> Self {
        Self::new()
    }
}

impl Ruleset for CoverageClash {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn goals(&self) -> &GoalEvaluator {
        &self.goals
    }

    fn briefing(&self, state: &State, viewer: RoleId) -> Vec<String> {
        let mut lines = Vec::new();
        if viewer == POLICY_MAKER {
            lines.push("WIN: reduce the Access Gap below 13.".to_owned());
            lines.push("AVOID: uninsured above 17.8% or health below 30.".to_owned());
            lines.push("AVOID: running the budget down to $0.".to_owned());
            if state.metric(BUDGET) < 15 {
                lines.push("WARNING: budget is running low. Consider requesting funds.".to_owned());
            }
        } else if viewer == INSURER {
            lines.push("WIN: push profit above $85 billion or the Access Gap above 45.".to_owned());
            lines.push("WIN: drive public trust below 30%.".to_owned());
            lines.push("AVOID: uninsured above 17.8% or health below 30.".to_owned());
            let cap = state.metric(PREMIUM_CAP_TURNS);
            if cap > 0 {
                lines.push(format!("Premium increases are capped for {cap} more turn(s)."));
            }
        }
        lines
    }
}

fn config() -> GameConfig {
    let roster = RoleRoster::new(vec![
        RoleConfig::acting(POLICY_MAKER, "Policy Maker"),
        RoleConfig::acting(INSURER, "Insurance Company"),
        RoleConfig::observer(OBSERVER, "Observer", 25),
    ]);

    GameConfig::new("Coverage Clash", roster)
        .with_metric(
            MetricConfig::new(UNINSURED, "Uninsured Rate", 133)
                .bounded(Bounds::range(0, 1000))
                .with_unit(Unit::TenthsPercent),
        )
        .with_metric(MetricConfig::new(HEALTH, "Public Health", 60).bounded(Bounds::PERCENT))
        .with_metric(MetricConfig::new(ACCESS_GAP, "Access Gap", 30).bounded(Bounds::PERCENT))
        .with_metric(
            MetricConfig::new(PROFIT, "Insurer Profit", 65)
                .bounded(Bounds::range(0, 200))
                .with_unit(Unit::Billions),
        )
        .with_metric(MetricConfig::new(TRUST, "Public Trust", 50).percent())
        .with_metric(MetricConfig::new(INFLUENCE, "Insurer Influence", 70).percent())
        .with_metric(
            MetricConfig::new(BUDGET, "Budget", 70)
                .bounded(Bounds::range(0, 200))
                .with_unit(Unit::Billions),
        )
        .with_metric(
            MetricConfig::new(PREMIUM_CAP_TURNS, "Premium Cap Turns", 0).bounded(Bounds::range(0, 3)),
        )
        .with_metric(
            MetricConfig::new(EXPANSION_CAP_TURNS, "Expansion Block Turns", 0)
                .bounded(Bounds::range(0, 2)),
        )
        .with_metric(
            MetricConfig::new(TURNS_SINCE_LOBBY, "Turns Since Lobbying", 0)
                .bounded(Bounds::NON_NEGATIVE),
        )
        .with_metric(MetricConfig::new(FUNDS_REQUESTED, "Funding Requests", 0).cumulative())
        .with_metric(MetricConfig::new(FUNDS_INTERCEPTED, "Intercepted Requests", 0).cumulative())
        .with_flag(FlagConfig::new(SKIP_NEXT_TURN, "Skip Next Turn", FlagKind::OneShot))
        .with_flag(FlagConfig::new(
            BRIBE_MENU,
            "Bribe Available",
            FlagKind::Menu { owner: INSURER },
        ))
        .with_flag(FlagConfig::new(BONUS_72, "Bonus at 72% Trust", FlagKind::Latch))
        .with_flag(FlagConfig::new(BONUS_62, "Bonus at 62% Trust", FlagKind::Latch))
        .with_flag(FlagConfig::new(BONUS_55, "Bonus at 55% Trust", FlagKind::Latch))
}

fn schedule() -> ScheduleConfig {
    let bonus = |threshold, latch| BonusRule {
        role: POLICY_MAKER,
        metric: TRUST,
        threshold,
        latch,
    };

    ScheduleConfig::new()
        .with_skip_flag(SKIP_NEXT_TURN)
        .with_bonus(bonus(72, BONUS_72))
        .with_bonus(bonus(62, BONUS_62))
        .with_bonus(bonus(55, BONUS_55))
        .with_periodic(PeriodicRule::new(
            "cap countdown",
            Cadence::OnHandoverTo(POLICY_MAKER),
            tick_caps,
        ))
}

/// Both blocking caps count down whenever the Policy Maker takes the turn.
fn tick_caps(s: &State) -> Vec<Delta> {
    let mut deltas = Vec::new();
    if s.metric(PREMIUM_CAP_TURNS) > 0 {
        deltas.push(Delta::add(PREMIUM_CAP_TURNS, -1));
    }
    if s.metric(EXPANSION_CAP_TURNS) > 0 {
        deltas.push(Delta::add(EXPANSION_CAP_TURNS, -1));
    }
    deltas
}

fn goals() -> GoalEvaluator {
    GoalEvaluator::new(vec![
        GoalRule::new("access gap closed", access_gap_closed),
        GoalRule::new("profit target", profit_target),
        GoalRule::new("uninsured collapse", uninsured_collapse),
        GoalRule::new("health collapse", health_collapse),
        GoalRule::new("access gap blown out", access_gap_blown_out),
        GoalRule::new("trust collapse", trust_collapse),
    ])
}

fn access_gap_closed(s: &State) -> Option<Outcome> {
    (s.metric(ACCESS_GAP) < 13).then(|| {
        Outcome::new(
            GameResult::Winner(POLICY_MAKER),
            "Policy Maker wins! The access gap has been closed.",
        )
    })
}

fn profit_target(s: &State) -> Option<Outcome> {
    (s.metric(PROFIT) > 85).then(|| {
        Outcome::new(
            GameResult::Winner(INSURER),
            "Insurance Company wins! Profit target achieved.",
        )
    })
}

fn uninsured_collapse(s: &State) -> Option<Outcome> {
    (s.metric(UNINSURED) > 178).then(|| {
        Outcome::new(
            GameResult::NoWinner,
            "Everyone loses! The uninsured rate has exceeded 17.8%.",
        )
    })
}

fn health_collapse(s: &State) -> Option<Outcome> {
    (s.metric(HEALTH) < 30).then(|| {
        Outcome::new(
            GameResult::NoWinner,
            "Everyone loses! Public health has collapsed.",
        )
    })
}

fn access_gap_blown_out(s: &State) -> Option<Outcome> {
    (s.metric(ACCESS_GAP) > 45).then(|| {
        Outcome::new(
            GameResult::Winner(INSURER),
            "Insurance Company wins! The access gap has grown too wide.",
        )
    })
}

fn trust_collapse(s: &State) -> Option<Outcome> {
    (s.metric(TRUST) < 30).then(|| {
        Outcome::new(
            GameResult::Winner(INSURER),
            "Insurance Company wins! Public trust in the Policy Maker has collapsed.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_initial_state_is_consistent() {
        let game = CoverageClash::new();
        let state = game.initial_state();

        assert!(state.check_invariants(game.config()).is_ok());
        assert_eq!(state.active_role(), POLICY_MAKER);
        assert_eq!(state.metric(UNINSURED), 133);
        assert_eq!(state.metric(BUDGET), 70);
        assert!(!game.is_terminal(&state));
    }

    #[test]
    fn test_initial_legal_operators() {
        let game = CoverageClash::new();
        let state = game.initial_state();

        assert_eq!(
            game.legal_operators(&state),
            vec![
                EXPAND_PUBLIC_COVERAGE,
                SUBSIDIZE_COVERAGE,
                REQUEST_FUNDS,
                CAP_PREMIUMS,
                MANDATE_COVERAGE,
                INVEST_IN_CLINICS,
                POLICY_MAKER_PASS,
            ]
        );
    }

    #[test]
    fn test_cap_countdown_on_handover() {
        let game = CoverageClash::new();
        let mut session = Session::seeded(1);
        // Low enough trust that capping does not earn a bonus turn.
        let state = game.initial_state().with_metric(TRUST, 40);

        let capped = game.apply(&mut session, &state, CAP_PREMIUMS).unwrap();
        assert_eq!(capped.metric(PREMIUM_CAP_TURNS), 3);
        assert!(!game.catalog().is_legal(&capped, RAISE_PREMIUMS));

        let back = game.apply(&mut session, &capped, RISK_SELECTION).unwrap();
        assert_eq!(back.active_role(), POLICY_MAKER);
        assert_eq!(back.metric(PREMIUM_CAP_TURNS), 2);
    }

    #[test]
    fn test_goal_priority() {
        let game = CoverageClash::new();
        // Both the gap-closed and profit rules match; the first one wins.
        let state = game
            .initial_state()
            .with_metric(ACCESS_GAP, 10)
            .with_metric(PROFIT, 90);

        let outcome = game.outcome(&state).unwrap();
        assert_eq!(outcome.result, GameResult::Winner(POLICY_MAKER));
    }

    #[test]
    fn test_briefing_hidden_from_observer() {
        let game = CoverageClash::new();
        let state = game.initial_state();

        assert!(game.briefing(&state, OBSERVER).is_empty());
        let text = game.render_text(&state, OBSERVER);
        assert!(!text.contains("WIN:"));
        assert!(game.render_text(&state, POLICY_MAKER).contains("WIN:"));
    }

    #[test]
    fn test_low_budget_warning() {
        let game = CoverageClash::new();
        let state = game.initial_state().with_metric(BUDGET, 10);

        let lines = game.briefing(&state, POLICY_MAKER);
        assert!(lines.iter().any(|l| l.starts_with("WARNING")));
    }
}
