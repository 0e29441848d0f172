//! Terminal conditions.
//!
//! A game lists its goal rules in priority order; the first rule that
//! matches decides the outcome. Once written, an outcome never changes.

use tracing::info;

use crate::core::{Outcome, State};

/// Checks one terminal condition.
pub type GoalCheck = fn(&State) -> Option<Outcome>;

/// A named terminal condition.
#[derive(Clone, Copy, Debug)]
pub struct GoalRule {
    /// Name for logs.
    pub name: &'static str,
    /// The condition.
    pub check: GoalCheck,
}

impl GoalRule {
    /// Create a new goal rule.
    #[must_use]
    pub const fn new(name: &'static str, check: GoalCheck) -> Self {
        Self { name, check }
    }
}

/// Priority-ordered terminal rules.
#[derive(Clone, Debug, Default)]
pub struct GoalEvaluator {
    rules: Vec<GoalRule>,
}

impl GoalEvaluator {
    /// Create an evaluator from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<GoalRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[GoalRule] {
        &self.rules
    }

    /// The outcome of `state`: the stored result if there is one, otherwise
    /// the first matching rule.
    #[must_use]
    pub fn evaluate(&self, state: &State) -> Option<Outcome> {
        if let Some(stored) = state.result() {
            return Some(stored.clone());
        }
        self.rules.iter().find_map(|rule| (rule.check)(state))
    }

    /// Evaluate and store the outcome, if any. Returns it when newly written.
    pub fn settle(&self, state: &mut State) -> Option<Outcome> {
        if state.is_terminal() {
            return None;
        }
        let outcome = self.evaluate(state)?;
        info!(
            step = state.step(),
            round = state.round(),
            result = ?outcome.result,
            "game over: {}",
            outcome.message
        );
        state.settle(outcome.clone());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameResult, MetricConfig, MetricId, RoleConfig, RoleId, RoleRoster};

    const SCORE: MetricId = MetricId::new(0);

    fn config() -> GameConfig {
        GameConfig::new(
            "Test",
            RoleRoster::new(vec![
                RoleConfig::acting(RoleId::new(0), "A"),
                RoleConfig::acting(RoleId::new(1), "B"),
            ]),
        )
        .with_metric(MetricConfig::new(SCORE, "Score", 50).percent())
    }

    fn high(state: &State) -> Option<Outcome> {
        (state.metric(SCORE) > 80).then(|| Outcome::new(GameResult::Winner(RoleId::new(0)), "A wins"))
    }

    fn very_high(state: &State) -> Option<Outcome> {
        (state.metric(SCORE) > 90).then(|| Outcome::new(GameResult::NoWinner, "Overheated"))
    }

    fn evaluator() -> GoalEvaluator {
        GoalEvaluator::new(vec![GoalRule::new("high", high), GoalRule::new("very high", very_high)])
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let config = config();
        let state = State::new(&config).with_metric(SCORE, 95);

        let outcome = evaluator().evaluate(&state).unwrap();
        assert_eq!(outcome.winner(), Some(RoleId::new(0)));
    }

    #[test]
    fn test_no_rule_matches() {
        let config = config();
        let state = State::new(&config);
        assert!(evaluator().evaluate(&state).is_none());
    }

    #[test]
    fn test_settle_is_idempotent() {
        let config = config();
        let evaluator = evaluator();
        let mut state = State::new(&config).with_metric(SCORE, 85);

        let first = evaluator.settle(&mut state);
        assert_eq!(first.map(|o| o.result), Some(GameResult::Winner(RoleId::new(0))));

        let mut changed = state.with_metric(SCORE, 10);
        assert!(evaluator.settle(&mut changed).is_none());
        assert_eq!(
            evaluator.evaluate(&changed).map(|o| o.result),
            Some(GameResult::Winner(RoleId::new(0)))
        );
    }
}
