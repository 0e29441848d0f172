//! World snapshots.
//!
//! ## State
//!
//! One immutable-per-step snapshot of the shared world:
//! - Turn position (active role, step, round, season)
//! - Metric, flag and list stores
//! - Trailing history of one tracked metric
//! - Terminal result (set once)
//! - Narrative of the step that produced the snapshot
//!
//! Every operator application produces a new snapshot via
//! [`State::successor`]; the predecessor is never mutated. Stores are built
//! on `im` persistent vectors so a successor shares structure with its
//! predecessor.
//!
//! ## State Values (i64 only)
//!
//! All metrics are `i64`. Fractional quantities use fixed point, e.g. an
//! uninsured rate of 13.3% is stored as `133` with [`Unit::TenthsPercent`].
//!
//! [`Unit::TenthsPercent`]: super::config::Unit::TenthsPercent

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::TransitionRecord;
use super::config::{FlagId, GameConfig, ListId, MetricId};
use super::error::InvariantViolation;
use super::metrics::{FlagStore, MetricStore};
use super::narrative::NarrativeEntry;
use super::outcome::Outcome;
use super::role::RoleId;

/// A snapshot of the shared world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    // === Turn Position ===
    active_role: RoleId,
    step: u32,
    round: u32,
    season: u32,

    // === World ===
    metrics: MetricStore,
    flags: FlagStore,
    lists: Vector<Vector<String>>,
    history: Vector<i64>,

    // === Bookkeeping ===
    result: Option<Outcome>,
    narrative: Vector<NarrativeEntry>,
    last_transition: Option<TransitionRecord>,
}

impl State {
    /// Create the initial state for a game.
    ///
    /// ## Defaults
    ///
    /// - `active_role`: first acting role of the roster
    /// - `step`: 0
    /// - `round`: 1
    /// - `season`: 0
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let mut state = Self {
            active_role: config.roster.first(),
            step: 0,
            round: 1,
            season: 0,
            metrics: MetricStore::from_config(&config.metrics),
            flags: FlagStore::from_config(&config.flags),
            lists: config.lists.iter().map(|_| Vector::new()).collect(),
            history: Vector::new(),
            result: None,
            narrative: Vector::new(),
            last_transition: None,
        };
        state.refresh_aggregates(config);
        state
    }

    /// Copy every field into a new snapshot for the next step.
    ///
    /// The narrative is the only field reset: it belongs to the step that
    /// produced `self`.
    #[must_use]
    pub fn successor(&self) -> Self {
        let Self {
            active_role,
            step,
            round,
            season,
            metrics,
            flags,
            lists,
            history,
            result,
            narrative: _,
            last_transition,
        } = self;

        Self {
            active_role: *active_role,
            step: *step,
            round: *round,
            season: *season,
            metrics: metrics.clone(),
            flags: flags.clone(),
            lists: lists.clone(),
            history: history.clone(),
            result: result.clone(),
            narrative: Vector::new(),
            last_transition: *last_transition,
        }
    }

    // === Builders ===

    /// Replace a metric value (clamped), e.g. to set up a scenario.
    ///
    /// Derived aggregates refresh on the next applied operator.
    #[must_use]
    pub fn with_metric(mut self, id: MetricId, value: i64) -> Self {
        self.metrics.set(id, value);
        self
    }

    /// Set or clear a flag.
    #[must_use]
    pub fn with_flag(mut self, id: FlagId, set: bool) -> Self {
        if set {
            self.flags.set(id);
        } else {
            self.flags.clear(id);
        }
        self
    }

    /// Place the game at a given round.
    #[must_use]
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round.max(1);
        self
    }

    /// Place the game in a given season.
    #[must_use]
    pub fn with_season(mut self, season: u32) -> Self {
        self.season = season;
        self
    }

    /// Hand the turn to a role.
    #[must_use]
    pub fn with_active_role(mut self, role: RoleId) -> Self {
        self.active_role = role;
        self
    }

    // === Accessors ===

    /// Role whose turn it is.
    #[must_use]
    pub fn active_role(&self) -> RoleId {
        self.active_role
    }

    /// Number of operator applications so far.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Round number (starts at 1).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Season index (game-defined cycle).
    #[must_use]
    pub fn season(&self) -> u32 {
        self.season
    }

    /// Current value of a metric.
    #[must_use]
    pub fn metric(&self, id: MetricId) -> i64 {
        self.metrics.get(id)
    }

    /// Check if a flag is set.
    #[must_use]
    pub fn flag(&self, id: FlagId) -> bool {
        self.flags.is_set(id)
    }

    /// Entries of a list (empty for undeclared lists).
    pub fn list(&self, id: ListId) -> impl Iterator<Item = &String> + '_ {
        self.lists.get(id.index()).into_iter().flat_map(|l| l.iter())
    }

    /// Number of entries in a list.
    #[must_use]
    pub fn list_len(&self, id: ListId) -> usize {
        self.lists.get(id.index()).map_or(0, Vector::len)
    }

    /// Metric store.
    #[must_use]
    pub fn metrics(&self) -> &MetricStore {
        &self.metrics
    }

    /// Flag store.
    #[must_use]
    pub fn flags(&self) -> &FlagStore {
        &self.flags
    }

    /// Trailing history of the tracked metric, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<i64> {
        &self.history
    }

    /// Terminal result, if the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&Outcome> {
        self.result.as_ref()
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// Narrative of the step that produced this snapshot.
    #[must_use]
    pub fn narrative(&self) -> &Vector<NarrativeEntry> {
        &self.narrative
    }

    /// The operator application that produced this snapshot.
    #[must_use]
    pub fn last_transition(&self) -> Option<TransitionRecord> {
        self.last_transition
    }

    // === Engine Mutators ===

    pub(crate) fn metrics_mut(&mut self) -> &mut MetricStore {
        &mut self.metrics
    }

    pub(crate) fn flags_mut(&mut self) -> &mut FlagStore {
        &mut self.flags
    }

    pub(crate) fn append_to_list(&mut self, id: ListId, text: String) {
        if let Some(list) = self.lists.get_mut(id.index()) {
            list.push_back(text);
        } else {
            tracing::warn!(list = id.0, "append to undeclared list ignored");
        }
    }

    pub(crate) fn set_active_role(&mut self, role: RoleId) {
        self.active_role = role;
    }

    pub(crate) fn advance_step(&mut self) {
        self.step = self.step.saturating_add(1);
    }

    pub(crate) fn advance_round(&mut self) {
        self.round = self.round.saturating_add(1);
    }

    pub(crate) fn set_season(&mut self, season: u32) {
        self.season = season;
    }

    /// Write the result unless one is already stored. Returns whether it was written.
    pub(crate) fn settle(&mut self, outcome: Outcome) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(outcome);
        true
    }

    pub(crate) fn push_narrative(&mut self, entry: NarrativeEntry) {
        self.narrative.push_back(entry);
    }

    pub(crate) fn extend_narrative(&mut self, entries: impl IntoIterator<Item = NarrativeEntry>) {
        self.narrative.extend(entries);
    }

    pub(crate) fn set_last_transition(&mut self, record: TransitionRecord) {
        self.last_transition = Some(record);
    }

    /// Recompute derived sums, then append the tracked metric to the history
    /// window if it changed.
    pub(crate) fn refresh_aggregates(&mut self, config: &GameConfig) {
        for derived in &config.derived {
            let sum = derived
                .parts
                .iter()
                .fold(0i64, |acc, part| acc.saturating_add(self.metrics.get(*part)));
            self.metrics.set(derived.target, sum);
        }

        if let Some(history) = config.history {
            let value = self.metrics.get(history.metric);
            if self.history.last() != Some(&value) {
                self.history.push_back(value);
                while self.history.len() > history.window {
                    self.history.pop_front();
                }
            }
        }
    }

    // === Invariants ===

    /// Check the structural guarantees every reachable state satisfies.
    pub fn check_invariants(&self, config: &GameConfig) -> Result<(), InvariantViolation> {
        if self.metrics.len() != config.metrics.len() {
            return Err(InvariantViolation::ShapeMismatch("metrics"));
        }
        if self.flags.len() != config.flags.len() {
            return Err(InvariantViolation::ShapeMismatch("flags"));
        }
        if self.lists.len() != config.lists.len() {
            return Err(InvariantViolation::ShapeMismatch("lists"));
        }
        if self.round < 1 {
            return Err(InvariantViolation::RoundUnderflow(self.round));
        }
        if let Some((metric, value)) = self.metrics.first_out_of_bounds() {
            return Err(InvariantViolation::OutOfBounds { metric, value });
        }
        if !self.is_terminal() && !config.roster.is_acting(self.active_role) {
            return Err(InvariantViolation::InactiveRole(self.active_role));
        }
        for derived in &config.derived {
            let expected = derived
                .parts
                .iter()
                .fold(0i64, |acc, part| acc.saturating_add(self.metrics.get(*part)));
            let stored = self.metrics.get(derived.target);
            let clamped = self
                .metrics
                .bounds(derived.target)
                .map_or(expected, |b| b.clamp(expected));
            if stored != clamped {
                return Err(InvariantViolation::DerivedMismatch {
                    target: derived.target,
                    stored,
                    expected,
                });
            }
        }
        Ok(())
    }
}
