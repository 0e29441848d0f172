//! Turn scheduling: skips, bonus turns, hand-over, rounds and seasons.
//!
//! After every operator application the scheduler decides who acts next:
//!
//! 0. Count the step and run step-keyed periodic rules
//! 1. A pending skip keeps the turn with the actor
//! 2. Otherwise the first unlatched bonus rule that the actor meets
//!    keeps the turn with the actor
//! 3. Otherwise the turn passes to the next acting role
//! 4. Wrapping back to the first role opens a new round, and every
//!    `rounds_per_season` rounds a new season
//!
//! All cadence constants live in [`ScheduleConfig`].

use tracing::debug;

use crate::core::{
    EntryKind, FlagId, GameConfig, MetricId, NarrativeEntry, RoleId, State,
};
use crate::effects::{Delta, EffectEngine};

/// Grants the actor an extra turn the first time a metric reaches a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusRule {
    /// Role eligible for the bonus.
    pub role: RoleId,
    /// Metric compared against the threshold.
    pub metric: MetricId,
    /// Minimum value (inclusive).
    pub threshold: i64,
    /// Latch recording that the bonus was spent.
    pub latch: FlagId,
}

/// When a periodic rule fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    /// After every operator application.
    EveryStep,
    /// When the step count is a multiple of `n`.
    EveryNSteps(u32),
    /// When the turn passes to a role.
    OnHandoverTo(RoleId),
    /// When a new round begins.
    OnNewRound,
    /// When a new season begins.
    OnNewSeason,
}

/// Computes periodic deltas from the current state.
pub type PeriodicEffect = fn(&State) -> Vec<Delta>;

/// A world side effect that fires on a cadence rather than on an operator.
#[derive(Clone, Copy, Debug)]
pub struct PeriodicRule {
    /// Name for logs.
    pub name: &'static str,
    /// When the rule fires.
    pub cadence: Cadence,
    /// What it does.
    pub effect: PeriodicEffect,
}

impl PeriodicRule {
    /// Create a new periodic rule.
    #[must_use]
    pub const fn new(name: &'static str, cadence: Cadence, effect: PeriodicEffect) -> Self {
        Self {
            name,
            cadence,
            effect,
        }
    }
}

/// Scheduling policy for one game.
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Rounds per season.
    pub rounds_per_season: u32,

    /// Season names, cycled in order.
    pub seasons: Vec<String>,

    /// One-shot flag that keeps the turn with the actor.
    pub skip_flag: Option<FlagId>,

    /// Bonus turn rules in priority order.
    pub bonus_rules: Vec<BonusRule>,

    /// Periodic side effects, applied in declaration order.
    pub periodic: Vec<PeriodicRule>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            rounds_per_season: 1,
            seasons: Vec::new(),
            skip_flag: None,
            bonus_rules: Vec::new(),
            periodic: Vec::new(),
        }
    }
}

impl ScheduleConfig {
    /// A policy with plain round-robin turns and no seasons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle through named seasons every `rounds_per_season` rounds.
    #[must_use]
    pub fn with_seasons<S: Into<String>>(
        mut self,
        rounds_per_season: u32,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        assert!(rounds_per_season > 0, "A season must last at least one round");
        self.rounds_per_season = rounds_per_season;
        self.seasons = names.into_iter().map(Into::into).collect();
        self
    }

    /// Declare the skip flag.
    #[must_use]
    pub fn with_skip_flag(mut self, flag: FlagId) -> Self {
        self.skip_flag = Some(flag);
        self
    }

    /// Add a bonus rule (lower priority than those already added).
    #[must_use]
    pub fn with_bonus(mut self, rule: BonusRule) -> Self {
        self.bonus_rules.push(rule);
        self
    }

    /// Add a periodic rule.
    #[must_use]
    pub fn with_periodic(mut self, rule: PeriodicRule) -> Self {
        if let Cadence::EveryNSteps(n) = rule.cadence {
            assert!(n > 0, "EveryNSteps cadence must be positive");
        }
        self.periodic.push(rule);
        self
    }

    /// Name of a season index, if seasons are named.
    #[must_use]
    pub fn season_name(&self, season: u32) -> Option<&str> {
        if self.seasons.is_empty() {
            return None;
        }
        self.seasons
            .get(season as usize % self.seasons.len())
            .map(String::as_str)
    }
}

/// What the scheduler decided after one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDecision {
    /// A pending skip was consumed; the actor keeps the turn.
    Skipped { role: RoleId },

    /// A bonus rule fired; the actor keeps the turn.
    Bonus { role: RoleId, metric: MetricId, threshold: i64 },

    /// The turn passed to the next acting role.
    Advanced {
        from: RoleId,
        to: RoleId,
        new_round: bool,
        new_season: bool,
    },
}

impl TurnDecision {
    /// The role that acts next.
    #[must_use]
    pub fn next_role(self) -> RoleId {
        match self {
            Self::Skipped { role } | Self::Bonus { role, .. } => role,
            Self::Advanced { to, .. } => to,
        }
    }
}

/// Applies a [`ScheduleConfig`] to successor snapshots.
#[derive(Clone, Copy, Debug)]
pub struct TurnScheduler<'a> {
    config: &'a GameConfig,
    schedule: &'a ScheduleConfig,
}

impl<'a> TurnScheduler<'a> {
    /// Create a scheduler for a game.
    #[must_use]
    pub fn new(config: &'a GameConfig, schedule: &'a ScheduleConfig) -> Self {
        Self { config, schedule }
    }

    /// Update the turn fields of `state` after `actor` applied an operator.
    ///
    /// Narration is appended to `entries`.
    pub fn advance(
        &self,
        state: &mut State,
        actor: RoleId,
        entries: &mut Vec<NarrativeEntry>,
    ) -> TurnDecision {
        state.advance_step();
        let step = state.step();
        self.run_periodic(state, entries, |cadence| match cadence {
            Cadence::EveryStep => true,
            Cadence::EveryNSteps(n) => n > 0 && step % n == 0,
            _ => false,
        });

        let decision = self.decide(state, actor, entries);
        state.set_active_role(decision.next_role());
        state.refresh_aggregates(self.config);

        debug!(step, round = state.round(), ?decision, "turn scheduled");
        decision
    }

    fn decide(
        &self,
        state: &mut State,
        actor: RoleId,
        entries: &mut Vec<NarrativeEntry>,
    ) -> TurnDecision {
        let step = state.step();
        let roster = &self.config.roster;

        if let Some(skip) = self.schedule.skip_flag {
            if state.flags_mut().consume(skip) {
                entries.push(NarrativeEntry::new(
                    step,
                    Some(actor),
                    EntryKind::Schedule,
                    format!("{} acts again while the next turn is skipped.", roster.name(actor)),
                ));
                return TurnDecision::Skipped { role: actor };
            }
        }

        let bonus = self.schedule.bonus_rules.iter().find(|rule| {
            rule.role == actor
                && state.metric(rule.metric) >= rule.threshold
                && !state.flag(rule.latch)
        });
        if let Some(rule) = bonus {
            state.flags_mut().set(rule.latch);
            entries.push(NarrativeEntry::new(
                step,
                Some(actor),
                EntryKind::Schedule,
                format!(
                    "{} earns a bonus turn: {} reached {}.",
                    roster.name(actor),
                    self.config.metric_name(rule.metric),
                    self.config.format_metric(rule.metric, rule.threshold)
                ),
            ));
            return TurnDecision::Bonus {
                role: actor,
                metric: rule.metric,
                threshold: rule.threshold,
            };
        }

        let next = roster.next_after(actor);
        state.flags_mut().clear_menus_of(actor);
        state.set_active_role(next);
        self.run_periodic(state, entries, |cadence| cadence == Cadence::OnHandoverTo(next));

        let mut new_round = false;
        let mut new_season = false;
        if next == roster.first() {
            new_round = true;
            state.advance_round();
            state.flags_mut().clear_round_scoped();
            self.run_periodic(state, entries, |cadence| cadence == Cadence::OnNewRound);

            if state.round() % self.schedule.rounds_per_season == 0 {
                new_season = true;
                let season = match self.schedule.seasons.len() {
                    0 => state.season().saturating_add(1),
                    n => (state.season() + 1) % n as u32,
                };
                state.set_season(season);
                if let Some(name) = self.schedule.season_name(season) {
                    entries.push(NarrativeEntry::new(
                        step,
                        None,
                        EntryKind::Season,
                        format!("The season turns to {name}."),
                    ));
                }
                self.run_periodic(state, entries, |cadence| cadence == Cadence::OnNewSeason);
            }
        }

        TurnDecision::Advanced {
            from: actor,
            to: next,
            new_round,
            new_season,
        }
    }

    fn run_periodic(
        &self,
        state: &mut State,
        entries: &mut Vec<NarrativeEntry>,
        fires: impl Fn(Cadence) -> bool,
    ) {
        let engine = EffectEngine::new(self.config);
        let step = state.step();
        for rule in self.schedule.periodic.iter().filter(|r| fires(r.cadence)) {
            let deltas = (rule.effect)(state);
            if deltas.is_empty() {
                continue;
            }
            debug!(rule = rule.name, step, "periodic rule fired");
            entries.extend(engine.apply_deltas(state, step, None, &deltas, EntryKind::Schedule));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FlagConfig, FlagKind, MetricConfig, RoleConfig, RoleRoster};

    const TRUST: MetricId = MetricId::new(0);
    const TICKS: MetricId = MetricId::new(1);
    const SKIP: FlagId = FlagId::new(0);
    const BONUS: FlagId = FlagId::new(1);
    const MENU: FlagId = FlagId::new(2);
    const ROUND: FlagId = FlagId::new(3);

    fn config() -> GameConfig {
        GameConfig::new(
            "Test",
            RoleRoster::new(vec![
                RoleConfig::acting(RoleId::new(0), "A"),
                RoleConfig::acting(RoleId::new(1), "B"),
                RoleConfig::observer(RoleId::new(2), "Observer", 25),
            ]),
        )
        .with_metric(MetricConfig::new(TRUST, "Trust", 50).percent())
        .with_metric(MetricConfig::new(TICKS, "Ticks", 0))
        .with_flag(FlagConfig::new(SKIP, "Skip", FlagKind::OneShot))
        .with_flag(FlagConfig::new(BONUS, "Bonus", FlagKind::Latch))
        .with_flag(FlagConfig::new(MENU, "Menu", FlagKind::Menu { owner: RoleId::new(1) }))
        .with_flag(FlagConfig::new(ROUND, "Round", FlagKind::Round).initially_set())
    }

    fn tick(_: &State) -> Vec<Delta> {
        vec![Delta::add(TICKS, 1)]
    }

    fn schedule() -> ScheduleConfig {
        ScheduleConfig::new()
            .with_seasons(2, ["Wet", "Dry"])
            .with_skip_flag(SKIP)
            .with_bonus(BonusRule {
                role: RoleId::new(0),
                metric: TRUST,
                threshold: 60,
                latch: BONUS,
            })
            .with_periodic(PeriodicRule::new("tick", Cadence::EveryNSteps(3), tick))
    }

    #[test]
    fn test_plain_advance_and_round() {
        let config = config();
        let schedule = schedule();
        let scheduler = TurnScheduler::new(&config, &schedule);
        let mut state = State::new(&config);
        let mut entries = Vec::new();

        let first = scheduler.advance(&mut state, RoleId::new(0), &mut entries);
        assert_eq!(
            first,
            TurnDecision::Advanced {
                from: RoleId::new(0),
                to: RoleId::new(1),
                new_round: false,
                new_season: false
            }
        );
        assert_eq!(state.round(), 1);
        assert!(state.flag(ROUND));

        let second = scheduler.advance(&mut state, RoleId::new(1), &mut entries);
        assert_eq!(second.next_role(), RoleId::new(0));
        assert_eq!(state.round(), 2);
        assert_eq!(state.season(), 1);
        assert!(!state.flag(ROUND));
        assert!(entries.iter().any(|e| e.text == "The season turns to Dry."));
    }

    #[test]
    fn test_skip_keeps_actor_once() {
        let config = config();
        let schedule = schedule();
        let scheduler = TurnScheduler::new(&config, &schedule);
        let mut state = State::new(&config).with_flag(SKIP, true);
        let mut entries = Vec::new();

        let decision = scheduler.advance(&mut state, RoleId::new(0), &mut entries);
        assert_eq!(decision, TurnDecision::Skipped { role: RoleId::new(0) });
        assert_eq!(state.active_role(), RoleId::new(0));
        assert!(!state.flag(SKIP));

        let decision = scheduler.advance(&mut state, RoleId::new(0), &mut entries);
        assert_eq!(decision.next_role(), RoleId::new(1));
    }

    #[test]
    fn test_bonus_fires_once_per_latch() {
        let config = config();
        let schedule = schedule();
        let scheduler = TurnScheduler::new(&config, &schedule);
        let mut state = State::new(&config).with_metric(TRUST, 65);
        let mut entries = Vec::new();

        let decision = scheduler.advance(&mut state, RoleId::new(0), &mut entries);
        assert!(matches!(decision, TurnDecision::Bonus { threshold: 60, .. }));
        assert!(state.flag(BONUS));

        let decision = scheduler.advance(&mut state, RoleId::new(0), &mut entries);
        assert_eq!(decision.next_role(), RoleId::new(1));
    }

    #[test]
    fn test_bonus_only_for_its_role() {
        let config = config();
        let schedule = schedule();
        let scheduler = TurnScheduler::new(&config, &schedule);
        let mut state = State::new(&config)
            .with_metric(TRUST, 90)
            .with_active_role(RoleId::new(1));
        let mut entries = Vec::new();

        let decision = scheduler.advance(&mut state, RoleId::new(1), &mut entries);
        assert_eq!(decision.next_role(), RoleId::new(0));
        assert!(!state.flag(BONUS));
    }

    #[test]
    fn test_menu_cleared_on_owner_handover() {
        let config = config();
        let schedule = schedule();
        let scheduler = TurnScheduler::new(&config, &schedule);
        let mut state = State::new(&config).with_flag(MENU, true);
        let mut entries = Vec::new();

        scheduler.advance(&mut state, RoleId::new(0), &mut entries);
        assert!(state.flag(MENU));

        scheduler.advance(&mut state, RoleId::new(1), &mut entries);
        assert!(!state.flag(MENU));
    }

    #[test]
    fn test_every_n_steps_keys_on_step() {
        let config = config();
        let schedule = schedule();
        let scheduler = TurnScheduler::new(&config, &schedule);
        let mut state = State::new(&config);
        let mut entries = Vec::new();

        for _ in 0..7 {
            let actor = state.active_role();
            scheduler.advance(&mut state, actor, &mut entries);
        }

        assert_eq!(state.step(), 7);
        assert_eq!(state.metric(TICKS), 2);
    }

    #[test]
    fn test_season_name_cycles() {
        let schedule = schedule();
        assert_eq!(schedule.season_name(0), Some("Wet"));
        assert_eq!(schedule.season_name(3), Some("Dry"));
        assert_eq!(ScheduleConfig::new().season_name(0), None);
    }
}
