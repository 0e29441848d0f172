//! Effect resolution - applying bundles to successor snapshots.
//!
//! The `EffectEngine` resolves an [`EffectBundle`] in a fixed order:
//!
//! 1. Copy the base state; narrate the headline
//! 2. Check the costs; on a shortfall run only the shortfall branch
//! 3. Apply the primary deltas
//! 4. Draw the stochastic branch, if any
//! 5. Recompute derived aggregates and the history window
//!
//! Every metric write clamps to its bounds. Writes to derived aggregates are
//! refused; they are always recomputed from their parts.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::core::{
    EntryKind, GameConfig, MetricId, NarrativeEntry, RandomSource, RoleId, State,
};

use super::{Delta, EffectBundle};

/// How a bundle resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Costs were paid and the deltas applied.
    Applied {
        /// Outcome of the stochastic branch, if the bundle had one.
        chance: Option<bool>,
    },
    /// A cost could not be paid; only the shortfall branch ran.
    Shortfall {
        /// The first metric that could not cover its cost.
        metric: MetricId,
    },
}

impl Resolution {
    /// Check if the costs were paid.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// A resolved bundle: the successor snapshot plus its narration.
#[derive(Clone, Debug)]
pub struct Resolved {
    /// Successor snapshot (turn fields untouched).
    pub state: State,

    /// Narration, in application order.
    pub entries: Vec<NarrativeEntry>,

    /// How the bundle resolved.
    pub resolution: Resolution,
}

/// Applies effect bundles and deltas for one game.
#[derive(Clone, Copy, Debug)]
pub struct EffectEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> EffectEngine<'a> {
    /// Create an engine for a game configuration.
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Resolve a bundle on a successor of `base`.
    ///
    /// The acting role is `base`'s active role. Entries are stamped with the
    /// step the application will produce.
    pub fn resolve(
        &self,
        base: &State,
        bundle: &EffectBundle,
        rng: &mut dyn RandomSource,
    ) -> Resolved {
        let mut state = base.successor();
        let actor = Some(base.active_role());
        let step = base.step().saturating_add(1);
        let mut entries = vec![NarrativeEntry::new(
            step,
            actor,
            EntryKind::Action,
            bundle.headline.clone(),
        )];

        let resolution = match self.find_shortfall(&state, bundle) {
            Some(metric) => {
                debug!(metric = metric.raw(), "operator costs not covered");
                entries.push(NarrativeEntry::new(
                    step,
                    actor,
                    EntryKind::Shortfall,
                    format!("Failed: insufficient {}.", self.config.metric_name(metric).to_lowercase()),
                ));
                entries.extend(self.apply_deltas(
                    &mut state,
                    step,
                    actor,
                    &bundle.shortfall,
                    EntryKind::Shortfall,
                ));
                Resolution::Shortfall { metric }
            }
            None => {
                for cost in &bundle.costs {
                    state.metrics_mut().add(cost.metric, -cost.amount);
                }
                entries.extend(self.apply_deltas(
                    &mut state,
                    step,
                    actor,
                    &bundle.deltas,
                    EntryKind::Effect,
                ));

                let chance = bundle.gamble.as_ref().map(|gamble| {
                    let hit = rng.chance(gamble.probability);
                    let branch = if hit { &gamble.hit } else { &gamble.miss };
                    entries.extend(self.apply_deltas(
                        &mut state,
                        step,
                        actor,
                        branch,
                        EntryKind::Chance { hit },
                    ));
                    hit
                });
                Resolution::Applied { chance }
            }
        };

        state.refresh_aggregates(self.config);

        Resolved {
            state,
            entries,
            resolution,
        }
    }

    /// Apply deltas in order, returning their narration.
    pub fn apply_deltas(
        &self,
        state: &mut State,
        step: u32,
        role: Option<RoleId>,
        deltas: &[Delta],
        kind: EntryKind,
    ) -> Vec<NarrativeEntry> {
        deltas
            .iter()
            .filter_map(|delta| self.apply_delta(state, delta))
            .map(|text| NarrativeEntry::new(step, role, kind, text))
            .collect()
    }

    /// Apply one delta. Returns its narration, if it has any.
    pub fn apply_delta(&self, state: &mut State, delta: &Delta) -> Option<String> {
        match delta {
            Delta::Add {
                metric,
                amount,
                report,
            } => {
                if self.refuse_derived(*metric) {
                    return None;
                }
                let before = state.metric(*metric);
                let after = state.metrics_mut().add(*metric, *amount);
                report.then(|| self.describe(*metric, before, after))
            }

            Delta::Scale {
                metric,
                numerator,
                denominator,
            } => {
                if !self.refuse_derived(*metric) {
                    state.metrics_mut().scale(*metric, *numerator, *denominator);
                }
                None
            }

            Delta::Set { metric, value } => {
                if !self.refuse_derived(*metric) {
                    state.metrics_mut().set(*metric, *value);
                }
                None
            }

            Delta::Transfer { from, to, amount } => {
                if !self.refuse_derived(*from) && !self.refuse_derived(*to) {
                    let moved = state.metrics_mut().transfer(*from, *to, *amount);
                    if moved < *amount {
                        debug!(from = from.raw(), to = to.raw(), requested = amount, moved, "partial transfer");
                    }
                }
                None
            }

            Delta::SetFlag(flag) => {
                state.flags_mut().set(*flag);
                None
            }

            Delta::ClearFlag(flag) => {
                state.flags_mut().clear(*flag);
                None
            }

            Delta::Append { list, text } => {
                state.append_to_list(*list, text.clone());
                None
            }

            Delta::Note(text) => Some(text.clone()),
        }
    }

    /// First non-debt cost that the state cannot cover.
    fn find_shortfall(&self, state: &State, bundle: &EffectBundle) -> Option<MetricId> {
        bundle
            .costs
            .iter()
            .filter(|cost| !cost.allow_debt)
            .find(|cost| {
                let floor = state.metrics().bounds(cost.metric).and_then(|b| b.floor());
                floor.is_some_and(|f| state.metric(cost.metric).saturating_sub(cost.amount) < f)
            })
            .map(|cost| cost.metric)
    }

    fn refuse_derived(&self, metric: MetricId) -> bool {
        let derived = self.config.is_derived(metric);
        if derived {
            warn!(metric = metric.raw(), "derived metrics are recomputed, not written");
        }
        derived
    }

    fn describe(&self, metric: MetricId, before: i64, after: i64) -> String {
        let name = self.config.metric_name(metric);
        let shown = self.config.format_metric(metric, after);
        match after.cmp(&before) {
            Ordering::Greater => format!("{name} increased to {shown}."),
            Ordering::Less => format!("{name} decreased to {shown}."),
            Ordering::Equal => format!("{name} holds at {shown}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Bounds, FlagConfig, FlagId, FlagKind, ListConfig, ListId, MetricConfig, RoleConfig,
        RoleRoster, ScriptedRandom, Unit,
    };

    const BUDGET: MetricId = MetricId::new(0);
    const TRUST: MetricId = MetricId::new(1);
    const OUTSIDE: MetricId = MetricId::new(2);
    const INSIDE: MetricId = MetricId::new(3);
    const TOTAL: MetricId = MetricId::new(4);
    const DEATHS: MetricId = MetricId::new(5);
    const DONE: FlagId = FlagId::new(0);
    const LOG: ListId = ListId::new(0);

    fn config() -> GameConfig {
        GameConfig::new(
            "Test",
            RoleRoster::new(vec![RoleConfig::acting(RoleId::new(0), "Council")]),
        )
        .with_metric(
            MetricConfig::new(BUDGET, "Budget", 20)
                .bounded(Bounds::NON_NEGATIVE)
                .with_unit(Unit::Dollars),
        )
        .with_metric(MetricConfig::new(TRUST, "Public Trust", 50).percent())
        .with_metric(MetricConfig::new(OUTSIDE, "Outside", 100).bounded(Bounds::NON_NEGATIVE))
        .with_metric(MetricConfig::new(INSIDE, "Inside", 50).bounded(Bounds::NON_NEGATIVE))
        .with_metric(MetricConfig::new(TOTAL, "Total", 0).bounded(Bounds::NON_NEGATIVE))
        .with_metric(MetricConfig::new(DEATHS, "Deaths", 0).cumulative())
        .with_flag(FlagConfig::new(DONE, "Done", FlagKind::Latch))
        .with_list(ListConfig {
            id: LOG,
            name: "Log".into(),
        })
        .with_derived(TOTAL, &[OUTSIDE, INSIDE])
        .with_history(TOTAL, 5)
    }

    #[test]
    fn test_resolve_pays_costs_and_applies() {
        let config = config();
        let engine = EffectEngine::new(&config);
        let base = State::new(&config);
        let bundle = EffectBundle::new("Funded.")
            .cost(BUDGET, 15)
            .report(TRUST, 4)
            .with(Delta::transfer(OUTSIDE, INSIDE, 30))
            .with(Delta::append(LOG, "funded"));

        let resolved = engine.resolve(&base, &bundle, &mut ScriptedRandom::always(false));

        assert_eq!(resolved.resolution, Resolution::Applied { chance: None });
        assert_eq!(resolved.state.metric(BUDGET), 5);
        assert_eq!(resolved.state.metric(TRUST), 54);
        assert_eq!(resolved.state.metric(OUTSIDE), 70);
        assert_eq!(resolved.state.metric(INSIDE), 80);
        assert_eq!(resolved.state.metric(TOTAL), 150);
        assert_eq!(resolved.state.list_len(LOG), 1);

        let texts: Vec<_> = resolved.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Funded.", "Public Trust increased to 54%."]);
        assert!(resolved.entries.iter().all(|e| e.step == 1));

        assert_eq!(base.metric(BUDGET), 20);
        assert_eq!(base.metric(TRUST), 50);
    }

    #[test]
    fn test_shortfall_is_all_or_nothing() {
        let config = config();
        let engine = EffectEngine::new(&config);
        let base = State::new(&config);
        let bundle = EffectBundle::new("Too expensive.")
            .cost(TRUST, 5)
            .cost(BUDGET, 25)
            .add(TRUST, 30)
            .gamble(1.0, [Delta::add(TRUST, 1)], [])
            .on_shortfall([Delta::report(TRUST, -3)]);

        let mut rng = ScriptedRandom::always(true);
        let resolved = engine.resolve(&base, &bundle, &mut rng);

        assert_eq!(resolved.resolution, Resolution::Shortfall { metric: BUDGET });
        assert!(!resolved.resolution.is_applied());
        assert_eq!(resolved.state.metric(BUDGET), 20);
        assert_eq!(resolved.state.metric(TRUST), 47);
        assert_eq!(rng.draws(), 0);

        let kinds: Vec<_> = resolved.entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Action, EntryKind::Shortfall, EntryKind::Shortfall]
        );
        assert_eq!(resolved.entries[1].text, "Failed: insufficient budget.");
    }

    #[test]
    fn test_debt_cost_skips_check() {
        let config = config();
        let engine = EffectEngine::new(&config);
        let base = State::new(&config);
        let bundle = EffectBundle::new("Overspent.").debt(BUDGET, 50).add(TRUST, 1);

        let resolved = engine.resolve(&base, &bundle, &mut ScriptedRandom::always(false));

        assert!(resolved.resolution.is_applied());
        assert_eq!(resolved.state.metric(BUDGET), 0);
        assert_eq!(resolved.state.metric(TRUST), 51);
    }

    #[test]
    fn test_gamble_branches_are_tagged() {
        let config = config();
        let engine = EffectEngine::new(&config);
        let base = State::new(&config);
        let bundle = EffectBundle::new("Gamble.").gamble(
            0.6,
            [Delta::report(TRUST, 10)],
            [Delta::note("It failed.")],
        );

        let hit = engine.resolve(&base, &bundle, &mut ScriptedRandom::always(true));
        assert_eq!(hit.resolution, Resolution::Applied { chance: Some(true) });
        assert_eq!(hit.state.metric(TRUST), 60);
        assert_eq!(hit.entries[1].kind, EntryKind::Chance { hit: true });

        let miss = engine.resolve(&base, &bundle, &mut ScriptedRandom::always(false));
        assert_eq!(miss.resolution, Resolution::Applied { chance: Some(false) });
        assert_eq!(miss.state.metric(TRUST), 50);
        assert_eq!(miss.entries[1].kind, EntryKind::Chance { hit: false });
        assert_eq!(miss.entries[1].text, "It failed.");
    }

    #[test]
    fn test_writes_clamp_and_refuse() {
        let config = config();
        let engine = EffectEngine::new(&config);
        let base = State::new(&config);
        let bundle = EffectBundle::new("Chaos.")
            .report(TRUST, 500)
            .add(DEATHS, 3)
            .add(DEATHS, -2)
            .set(TOTAL, 1)
            .set_flag(DONE)
            .clear_flag(DONE)
            .with(Delta::scale(OUTSIDE, 1, 3));

        let resolved = engine.resolve(&base, &bundle, &mut ScriptedRandom::always(false));
        let state = &resolved.state;

        assert_eq!(state.metric(TRUST), 100);
        assert_eq!(state.metric(DEATHS), 3);
        assert_eq!(state.metric(OUTSIDE), 33);
        assert_eq!(state.metric(TOTAL), 83);
        assert!(state.flag(DONE));
        assert!(state.check_invariants(&config).is_ok());
        assert_eq!(resolved.entries[1].text, "Public Trust increased to 100%.");
    }

    #[test]
    fn test_history_tracks_changes() {
        let config = config();
        let engine = EffectEngine::new(&config);
        let base = State::new(&config);

        let unchanged = engine.resolve(&base, &EffectBundle::new("Nothing."), &mut ScriptedRandom::always(false));
        assert_eq!(unchanged.state.history().len(), 1);

        let moved = engine.resolve(
            &base,
            &EffectBundle::new("More.").add(OUTSIDE, 10),
            &mut ScriptedRandom::always(false),
        );
        assert_eq!(
            moved.state.history().iter().copied().collect::<Vec<_>>(),
            vec![150, 160]
        );
    }
}
