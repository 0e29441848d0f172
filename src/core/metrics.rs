//! Dense metric and flag stores.
//!
//! Both stores are `im` vectors indexed by their typed IDs, so cloning a
//! store for a successor snapshot is O(1) and a successor only pays for the
//! slots it changes.
//!
//! Every metric write goes through [`MetricStore`], which is the single place
//! where bounds are enforced: values saturate into their declared range and
//! cumulative counters refuse to move backwards.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{Bounds, FlagConfig, FlagId, FlagKind, MetricConfig, MetricId};
use super::role::RoleId;

/// One metric value plus the rules that govern writes to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSlot {
    /// Current value.
    pub value: i64,
    /// Legal range.
    pub bounds: Bounds,
    /// Never decreases.
    pub cumulative: bool,
}

/// Dense table of metric values indexed by [`MetricId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricStore {
    slots: Vector<MetricSlot>,
}

impl MetricStore {
    /// Build a store holding each metric's initial value.
    #[must_use]
    pub fn from_config(metrics: &[MetricConfig]) -> Self {
        Self {
            slots: metrics
                .iter()
                .map(|m| MetricSlot {
                    value: m.bounds.clamp(m.initial),
                    bounds: m.bounds,
                    cumulative: m.cumulative,
                })
                .collect(),
        }
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the store holds no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current value of a metric (0 for undeclared IDs).
    #[must_use]
    pub fn get(&self, id: MetricId) -> i64 {
        self.slots.get(id.index()).map_or(0, |s| s.value)
    }

    /// Declared bounds of a metric.
    #[must_use]
    pub fn bounds(&self, id: MetricId) -> Option<Bounds> {
        self.slots.get(id.index()).map(|s| s.bounds)
    }

    /// Overwrite a metric, clamped to its bounds. Returns the stored value.
    ///
    /// A cumulative metric keeps its current value if `value` is lower.
    pub fn set(&mut self, id: MetricId, value: i64) -> i64 {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            warn!(metric = id.raw(), "write to undeclared metric ignored");
            return 0;
        };
        if slot.cumulative && value < slot.value {
            warn!(metric = id.raw(), from = slot.value, to = value, "cumulative metric cannot decrease");
            return slot.value;
        }
        slot.value = slot.bounds.clamp(value);
        slot.value
    }

    /// Add a signed delta (saturating, then clamped). Returns the stored value.
    pub fn add(&mut self, id: MetricId, delta: i64) -> i64 {
        let current = self.get(id);
        self.set(id, current.saturating_add(delta))
    }

    /// Multiply by `numerator / denominator`, rounding toward zero.
    pub fn scale(&mut self, id: MetricId, numerator: i64, denominator: i64) -> i64 {
        if denominator == 0 {
            warn!(metric = id.raw(), "scale with zero denominator ignored");
            return self.get(id);
        }
        let scaled = i128::from(self.get(id)) * i128::from(numerator) / i128::from(denominator);
        let clamped = i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX });
        self.set(id, clamped)
    }

    /// Move up to `amount` from `from` into `to`.
    ///
    /// Moves only what the source can give without dropping below its floor
    /// and what the target can take without exceeding its ceiling, so the sum
    /// of the two metrics is conserved. Returns the amount actually moved.
    pub fn transfer(&mut self, from: MetricId, to: MetricId, amount: i64) -> i64 {
        if amount <= 0 || from == to {
            return 0;
        }
        let (Some(src), Some(dst)) = (self.slots.get(from.index()), self.slots.get(to.index()))
        else {
            return 0;
        };
        if src.cumulative {
            warn!(metric = from.raw(), "cannot transfer out of a cumulative metric");
            return 0;
        }

        let available = match src.bounds.floor() {
            Some(floor) => src.value.saturating_sub(floor).max(0),
            None => amount,
        };
        let room = match dst.bounds {
            Bounds::Range { max, .. } => max.saturating_sub(dst.value).max(0),
            Bounds::AtLeast(_) | Bounds::Unbounded => amount,
        };
        let moved = amount.min(available).min(room);

        if moved > 0 {
            self.add(from, -moved);
            self.add(to, moved);
        }
        moved
    }

    /// Check that every value lies within its bounds.
    ///
    /// Returns the first offending metric.
    #[must_use]
    pub fn first_out_of_bounds(&self) -> Option<(MetricId, i64)> {
        self.slots
            .iter()
            .enumerate()
            .find(|(_, s)| !s.bounds.contains(s.value))
            .map(|(i, s)| (MetricId::new(i as u16), s.value))
    }

    /// Iterate over `(id, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (MetricId, i64)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (MetricId::new(i as u16), s.value))
    }
}

/// One flag plus its lifetime rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSlot {
    /// Lifetime rules.
    pub kind: FlagKind,
    /// Current value.
    pub set: bool,
}

/// Dense table of boolean flags indexed by [`FlagId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagStore {
    slots: Vector<FlagSlot>,
}

impl FlagStore {
    /// Build a store holding each flag's initial value.
    #[must_use]
    pub fn from_config(flags: &[FlagConfig]) -> Self {
        Self {
            slots: flags
                .iter()
                .map(|f| FlagSlot {
                    kind: f.kind,
                    set: f.initial,
                })
                .collect(),
        }
    }

    /// Number of flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the store holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if a flag is set (false for undeclared IDs).
    #[must_use]
    pub fn is_set(&self, id: FlagId) -> bool {
        self.slots.get(id.index()).is_some_and(|s| s.set)
    }

    /// Kind of a flag.
    #[must_use]
    pub fn kind(&self, id: FlagId) -> Option<FlagKind> {
        self.slots.get(id.index()).map(|s| s.kind)
    }

    /// Set a flag.
    pub fn set(&mut self, id: FlagId) {
        match self.slots.get_mut(id.index()) {
            Some(slot) => slot.set = true,
            None => warn!(flag = id.0, "write to undeclared flag ignored"),
        }
    }

    /// Clear a flag. Latches refuse; returns whether the flag was cleared.
    pub fn clear(&mut self, id: FlagId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if slot.kind == FlagKind::Latch {
            if slot.set {
                warn!(flag = id.0, "latch flags never revert");
            }
            return false;
        }
        let was_set = slot.set;
        slot.set = false;
        was_set
    }

    /// Clear a flag and report whether it had been set.
    pub fn consume(&mut self, id: FlagId) -> bool {
        self.clear(id)
    }

    /// Clear every round-scoped flag.
    pub fn clear_round_scoped(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.kind == FlagKind::Round {
                slot.set = false;
            }
        }
    }

    /// Clear every menu flag owned by `role`.
    pub fn clear_menus_of(&mut self, role: RoleId) {
        for slot in self.slots.iter_mut() {
            if slot.kind == (FlagKind::Menu { owner: role }) {
                slot.set = false;
            }
        }
    }

    /// Iterate over `(id, slot)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FlagId, FlagSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (FlagId::new(i as u16), *s))
    }
}
