//! Effect definitions.
//!
//! Operators never mutate state themselves. They describe what should happen
//! as an [`EffectBundle`]: the costs to pay, the deltas to apply, an optional
//! stochastic branch, and what happens instead if the costs cannot be paid.
//! The [`EffectEngine`](super::EffectEngine) applies the bundle to a
//! successor snapshot.

use smallvec::SmallVec;

use crate::core::{FlagId, ListId, MetricId};

/// An atomic change to the world.
///
/// ## Metric Deltas
///
/// - `Add`: Add a signed amount (optionally narrated)
/// - `Scale`: Multiply by a ratio, rounding toward zero
/// - `Set`: Overwrite the value
/// - `Transfer`: Move an amount between two metrics, conserving their sum
///
/// ## Flags and Lists
///
/// - `SetFlag` / `ClearFlag`: Toggle a flag (latches ignore clears)
/// - `Append`: Push a line onto a list
///
/// ## Narration
///
/// - `Note`: Emit a narrative line without touching state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delta {
    /// Add a signed amount. Reported adds narrate the new value.
    Add {
        metric: MetricId,
        amount: i64,
        report: bool,
    },

    /// Multiply by `numerator / denominator`.
    Scale {
        metric: MetricId,
        numerator: i64,
        denominator: i64,
    },

    /// Overwrite the value.
    Set { metric: MetricId, value: i64 },

    /// Move up to `amount` from one metric into another.
    Transfer {
        from: MetricId,
        to: MetricId,
        amount: i64,
    },

    /// Set a flag.
    SetFlag(FlagId),

    /// Clear a flag.
    ClearFlag(FlagId),

    /// Append a line to a list.
    Append { list: ListId, text: String },

    /// Narrative line only.
    Note(String),
}

impl Delta {
    /// Silent additive delta.
    #[must_use]
    pub fn add(metric: MetricId, amount: i64) -> Self {
        Self::Add {
            metric,
            amount,
            report: false,
        }
    }

    /// Additive delta that narrates "X increased to Y."
    #[must_use]
    pub fn report(metric: MetricId, amount: i64) -> Self {
        Self::Add {
            metric,
            amount,
            report: true,
        }
    }

    /// Multiplicative delta.
    #[must_use]
    pub fn scale(metric: MetricId, numerator: i64, denominator: i64) -> Self {
        Self::Scale {
            metric,
            numerator,
            denominator,
        }
    }

    /// Overwrite delta.
    #[must_use]
    pub fn set(metric: MetricId, value: i64) -> Self {
        Self::Set { metric, value }
    }

    /// Conserving move between two metrics.
    #[must_use]
    pub fn transfer(from: MetricId, to: MetricId, amount: i64) -> Self {
        Self::Transfer { from, to, amount }
    }

    /// Append a line to a list.
    pub fn append(list: ListId, text: impl Into<String>) -> Self {
        Self::Append {
            list,
            text: text.into(),
        }
    }

    /// Narrative line.
    pub fn note(text: impl Into<String>) -> Self {
        Self::Note(text.into())
    }
}

/// A price that must be paid before an operator's deltas apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cost {
    /// Metric paid from.
    pub metric: MetricId,

    /// Amount deducted.
    pub amount: i64,

    /// Debt costs are deducted without an affordability check.
    pub allow_debt: bool,
}

/// A single random draw between two delta lists.
#[derive(Clone, Debug, PartialEq)]
pub struct Gamble {
    /// Probability of the `hit` branch.
    pub probability: f64,

    /// Applied when the draw succeeds.
    pub hit: Vec<Delta>,

    /// Applied when the draw fails.
    pub miss: Vec<Delta>,
}

/// Everything one operator application does.
///
/// ## Example
///
/// ```
/// use stakeholder_sim::core::MetricId;
/// use stakeholder_sim::effects::{Delta, EffectBundle};
///
/// const BUDGET: MetricId = MetricId::new(0);
/// const TRUST: MetricId = MetricId::new(1);
///
/// let bundle = EffectBundle::new("The council funds a clinic.")
///     .cost(BUDGET, 15)
///     .with(Delta::report(TRUST, 4))
///     .on_shortfall([Delta::add(TRUST, -1)]);
///
/// assert_eq!(bundle.costs.len(), 1);
/// assert_eq!(bundle.deltas.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EffectBundle {
    /// Narrates the action.
    pub headline: String,

    /// Paid all-or-nothing before anything else.
    pub costs: SmallVec<[Cost; 2]>,

    /// Applied in order once the costs are paid.
    pub deltas: Vec<Delta>,

    /// Drawn after the deltas, once the costs are paid.
    pub gamble: Option<Gamble>,

    /// Applied instead of everything else when a cost cannot be paid.
    pub shortfall: Vec<Delta>,
}

impl EffectBundle {
    /// Create a bundle with a headline and nothing else.
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            costs: SmallVec::new(),
            deltas: Vec::new(),
            gamble: None,
            shortfall: Vec::new(),
        }
    }

    /// Declare an affordability-checked cost.
    #[must_use]
    pub fn cost(mut self, metric: MetricId, amount: i64) -> Self {
        self.costs.push(Cost {
            metric,
            amount,
            allow_debt: false,
        });
        self
    }

    /// Declare a cost that is deducted even if it overdraws the metric.
    #[must_use]
    pub fn debt(mut self, metric: MetricId, amount: i64) -> Self {
        self.costs.push(Cost {
            metric,
            amount,
            allow_debt: true,
        });
        self
    }

    /// Append one delta.
    #[must_use]
    pub fn with(mut self, delta: Delta) -> Self {
        self.deltas.push(delta);
        self
    }

    /// Append several deltas.
    #[must_use]
    pub fn with_all(mut self, deltas: impl IntoIterator<Item = Delta>) -> Self {
        self.deltas.extend(deltas);
        self
    }

    /// Silent additive delta.
    #[must_use]
    pub fn add(self, metric: MetricId, amount: i64) -> Self {
        self.with(Delta::add(metric, amount))
    }

    /// Narrated additive delta.
    #[must_use]
    pub fn report(self, metric: MetricId, amount: i64) -> Self {
        self.with(Delta::report(metric, amount))
    }

    /// Overwrite delta.
    #[must_use]
    pub fn set(self, metric: MetricId, value: i64) -> Self {
        self.with(Delta::set(metric, value))
    }

    /// Set a flag.
    #[must_use]
    pub fn set_flag(self, flag: FlagId) -> Self {
        self.with(Delta::SetFlag(flag))
    }

    /// Clear a flag.
    #[must_use]
    pub fn clear_flag(self, flag: FlagId) -> Self {
        self.with(Delta::ClearFlag(flag))
    }

    /// Narrative line.
    #[must_use]
    pub fn note(self, text: impl Into<String>) -> Self {
        self.with(Delta::note(text))
    }

    /// Declare the stochastic branch.
    #[must_use]
    pub fn gamble(
        mut self,
        probability: f64,
        hit: impl IntoIterator<Item = Delta>,
        miss: impl IntoIterator<Item = Delta>,
    ) -> Self {
        self.gamble = Some(Gamble {
            probability,
            hit: hit.into_iter().collect(),
            miss: miss.into_iter().collect(),
        });
        self
    }

    /// Declare what happens when a cost cannot be paid.
    #[must_use]
    pub fn on_shortfall(mut self, deltas: impl IntoIterator<Item = Delta>) -> Self {
        self.shortfall.extend(deltas);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: MetricId = MetricId::new(0);
    const B: MetricId = MetricId::new(1);

    #[test]
    fn test_builders() {
        let bundle = EffectBundle::new("Acted.")
            .cost(A, 5)
            .debt(B, 3)
            .add(A, 1)
            .report(B, -2)
            .set_flag(FlagId::new(0))
            .note("Noted.");

        assert_eq!(bundle.headline, "Acted.");
        assert_eq!(bundle.costs.len(), 2);
        assert!(!bundle.costs[0].allow_debt);
        assert!(bundle.costs[1].allow_debt);
        assert_eq!(
            bundle.deltas,
            vec![
                Delta::add(A, 1),
                Delta::report(B, -2),
                Delta::SetFlag(FlagId::new(0)),
                Delta::Note("Noted.".into()),
            ]
        );
        assert!(bundle.gamble.is_none());
        assert!(bundle.shortfall.is_empty());
    }

    #[test]
    fn test_gamble_and_shortfall() {
        let bundle = EffectBundle::new("Risky.")
            .gamble(0.3, [Delta::add(A, 1)], [Delta::add(A, -1)])
            .on_shortfall([Delta::note("Nothing happens.")]);

        let gamble = bundle.gamble.as_ref().unwrap();
        assert!((gamble.probability - 0.3).abs() < f64::EPSILON);
        assert_eq!(gamble.hit, vec![Delta::add(A, 1)]);
        assert_eq!(gamble.miss, vec![Delta::add(A, -1)]);
        assert_eq!(bundle.shortfall.len(), 1);
    }
}
