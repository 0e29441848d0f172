//! Ruleset trait for game implementations.
//!
//! Games implement `Ruleset` by supplying their data:
//! - Configuration (roles, metrics, flags)
//! - Scheduling policy
//! - Operator catalog
//! - Goal rules
//! - Per-role briefings
//!
//! Everything else (legality, application, termination, role views) is
//! provided by the trait and identical for every game.

use std::fmt::Write as _;

use tracing::debug;

use crate::core::{
    EngineError, EntryKind, GameConfig, NarrativeEntry, OperatorId, Outcome, Rejection, RoleId,
    State, TransitionRecord,
};
use crate::effects::{EffectEngine, Resolved};
use crate::session::Session;

use super::{Catalog, GoalEvaluator, ScheduleConfig, TurnScheduler};

/// Game rules.
///
/// ## Implementation Notes
///
/// - `catalog`: every acting role must own an always-legal operator
/// - `briefing`: goal hints and warnings for one role; observers never see it
pub trait Ruleset {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Get the scheduling policy.
    fn schedule(&self) -> &ScheduleConfig;

    /// Get the operator catalog.
    fn catalog(&self) -> &Catalog;

    /// Get the goal rules.
    fn goals(&self) -> &GoalEvaluator;

    /// Role-specific goal hints and warnings.
    fn briefing(&self, state: &State, viewer: RoleId) -> Vec<String>;

    // === Provided Methods ===

    /// The game's initial state.
    fn initial_state(&self) -> State {
        State::new(self.config())
    }

    /// Operators the active role may apply, in catalog order.
    ///
    /// Empty only in a terminal state.
    fn legal_operators(&self, state: &State) -> Vec<OperatorId> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        self.catalog().legal_operators(state)
    }

    /// Apply an operator, producing the successor snapshot.
    ///
    /// The predecessor is never modified. Illegal operators produce an error
    /// and no successor. Narration is stored on the successor and forwarded to
    /// the session's sink.
    fn apply(
        &self,
        session: &mut Session,
        state: &State,
        operator: OperatorId,
    ) -> Result<State, EngineError> {
        // A goal may already hold on a state whose result was never settled.
        if self.is_terminal(state) {
            let def = self
                .catalog()
                .get(operator)
                .ok_or(EngineError::UnknownOperator(operator))?;
            return Err(EngineError::IllegalOperator {
                operator,
                name: def.name.to_string(),
                reason: Rejection::GameOver,
            });
        }
        let def = self.catalog().check(state, operator)?;
        let config = self.config();
        let actor = state.active_role();
        let bundle = (def.transform)(state);

        let Resolved {
            state: mut next,
            mut entries,
            resolution,
        } = EffectEngine::new(config).resolve(state, &bundle, session.rng_mut());
        debug!(operator = def.name, role = actor.0, ?resolution, "operator applied");

        TurnScheduler::new(config, self.schedule()).advance(&mut next, actor, &mut entries);
        next.set_last_transition(TransitionRecord::new(actor, operator, next.step(), state.round()));

        if let Some(outcome) = self.goals().settle(&mut next) {
            entries.push(NarrativeEntry::new(
                next.step(),
                None,
                EntryKind::Outcome,
                outcome.message,
            ));
        }

        for entry in &entries {
            session.record(entry);
        }
        next.extend_narrative(entries);

        debug_assert!(
            next.check_invariants(config).is_ok(),
            "invariant violated after {}: {:?}",
            def.name,
            next.check_invariants(config)
        );
        Ok(next)
    }

    /// Check if the game is over.
    fn is_terminal(&self, state: &State) -> bool {
        state.is_terminal() || self.goals().evaluate(state).is_some()
    }

    /// The game's outcome, if it is over.
    fn outcome(&self, state: &State) -> Option<Outcome> {
        self.goals().evaluate(state)
    }

    /// Role-filtered text view of a state.
    fn render_text(&self, state: &State, viewer: RoleId) -> String {
        let config = self.config();
        let roster = &config.roster;
        let mut out = String::new();

        let _ = writeln!(out, "=== {} ===", config.name);
        let season = self
            .schedule()
            .season_name(state.season())
            .map(|s| format!(" | {s}"))
            .unwrap_or_default();
        let _ = writeln!(out, "Round {}{} | Step {}", state.round(), season, state.step());
        let _ = writeln!(out, "Viewing as: {}", roster.name(viewer));
        out.push('\n');

        for metric in &config.metrics {
            let _ = writeln!(
                out,
                "  {}: {}",
                metric.name,
                metric.unit.format(state.metric(metric.id))
            );
        }

        if state.history().len() > 1 {
            let trend: Vec<_> = state.history().iter().map(i64::to_string).collect();
            let _ = writeln!(out, "  Trend: {}", trend.join(" -> "));
        }
        out.push('\n');

        match self.outcome(state) {
            Some(outcome) => {
                let _ = writeln!(out, "GAME OVER: {}", outcome.message);
            }
            None if state.active_role() == viewer => {
                let _ = writeln!(out, "Your turn.");
            }
            None => {
                let _ = writeln!(out, "Waiting for {}.", roster.name(state.active_role()));
            }
        }

        if roster.is_acting(viewer) {
            for line in self.briefing(state, viewer) {
                let _ = writeln!(out, "- {line}");
            }
        }

        out
    }
}
