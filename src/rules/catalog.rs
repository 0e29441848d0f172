//! The fixed operator table.
//!
//! Each game declares its operators once, as plain records with function
//! pointers for the precondition and the transform. The catalog answers
//! legality questions; it never mutates state.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, OperatorId, Rejection, RoleId, State};
use crate::effects::EffectBundle;

/// Pure legality test.
pub type Precondition = fn(&State) -> bool;

/// Pure effect description.
pub type Transform = fn(&State) -> EffectBundle;

/// One catalog entry.
#[derive(Clone, Copy, Debug)]
pub struct OperatorDef {
    /// Unique identifier.
    pub id: OperatorId,

    /// Display name.
    pub name: &'static str,

    /// The only role that may apply this operator.
    pub owner: RoleId,

    /// Legality beyond ownership and turn order.
    pub precondition: Precondition,

    /// Builds the effect bundle.
    pub transform: Transform,
}

impl OperatorDef {
    /// Create a new operator record.
    #[must_use]
    pub const fn new(
        id: OperatorId,
        name: &'static str,
        owner: RoleId,
        precondition: Precondition,
        transform: Transform,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            precondition,
            transform,
        }
    }
}

/// Precondition for operators that are always legal on their owner's turn.
#[must_use]
pub fn always(_state: &State) -> bool {
    true
}

/// A game's complete operator table.
///
/// ## Example
///
/// ```
/// use stakeholder_sim::core::{OperatorId, RoleId};
/// use stakeholder_sim::effects::EffectBundle;
/// use stakeholder_sim::rules::{always, Catalog, OperatorDef};
///
/// let catalog = Catalog::new(vec![OperatorDef::new(
///     OperatorId::new(0),
///     "Pass",
///     RoleId::new(0),
///     always,
///     |_| EffectBundle::new("Nothing happens."),
/// )]);
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.get(OperatorId::new(0)).map(|op| op.name), Some("Pass"));
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    operators: Vec<OperatorDef>,
    index: FxHashMap<OperatorId, usize>,
}

impl Catalog {
    /// Build a catalog. Operator IDs must be unique.
    pub fn new(operators: Vec<OperatorDef>) -> Self {
        let mut index = FxHashMap::default();
        for (i, op) in operators.iter().enumerate() {
            let previous = index.insert(op.id, i);
            assert!(previous.is_none(), "Duplicate operator ID: {}", op.id);
        }
        Self { operators, index }
    }

    /// Number of operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Look up an operator.
    #[must_use]
    pub fn get(&self, id: OperatorId) -> Option<&OperatorDef> {
        self.index.get(&id).map(|&i| &self.operators[i])
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OperatorDef> {
        self.operators.iter()
    }

    /// Operators owned by a role, in declaration order.
    pub fn for_role(&self, role: RoleId) -> impl Iterator<Item = &OperatorDef> + '_ {
        self.operators.iter().filter(move |op| op.owner == role)
    }

    /// Check that `id` may be applied to `state`.
    pub fn check(&self, state: &State, id: OperatorId) -> Result<&OperatorDef, EngineError> {
        let op = self.get(id).ok_or(EngineError::UnknownOperator(id))?;
        let reject = |reason| EngineError::IllegalOperator {
            operator: id,
            name: op.name.to_string(),
            reason,
        };

        if state.is_terminal() {
            return Err(reject(Rejection::GameOver));
        }
        if op.owner != state.active_role() {
            return Err(reject(Rejection::NotYourTurn {
                active: state.active_role(),
            }));
        }
        if !(op.precondition)(state) {
            return Err(reject(Rejection::PreconditionFailed));
        }
        Ok(op)
    }

    /// Check if `id` may be applied to `state`.
    #[must_use]
    pub fn is_legal(&self, state: &State, id: OperatorId) -> bool {
        self.check(state, id).is_ok()
    }

    /// All operators applicable to `state`, in declaration order.
    ///
    /// Empty only in a terminal state.
    #[must_use]
    pub fn legal_operators(&self, state: &State) -> Vec<OperatorId> {
        if state.is_terminal() {
            return Vec::new();
        }
        self.for_role(state.active_role())
            .filter(|op| (op.precondition)(state))
            .map(|op| op.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameResult, MetricConfig, MetricId, Outcome, RoleConfig, RoleRoster};

    const CASH: MetricId = MetricId::new(0);

    fn config() -> GameConfig {
        GameConfig::new(
            "Test",
            RoleRoster::new(vec![
                RoleConfig::acting(RoleId::new(0), "A"),
                RoleConfig::acting(RoleId::new(1), "B"),
            ]),
        )
        .with_metric(MetricConfig::new(CASH, "Cash", 5))
    }

    fn rich(state: &State) -> bool {
        state.metric(CASH) >= 10
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            OperatorDef::new(OperatorId::new(0), "Spend", RoleId::new(0), rich, |_| {
                EffectBundle::new("Spent.")
            }),
            OperatorDef::new(OperatorId::new(1), "Pass", RoleId::new(0), always, |_| {
                EffectBundle::new("Passed.")
            }),
            OperatorDef::new(OperatorId::new(2), "Pass", RoleId::new(1), always, |_| {
                EffectBundle::new("Passed.")
            }),
        ])
    }

    #[test]
    fn test_legal_operators_filters_owner_and_precondition() {
        let config = config();
        let catalog = catalog();
        let state = State::new(&config);

        assert_eq!(catalog.legal_operators(&state), vec![OperatorId::new(1)]);

        let rich_state = state.with_metric(CASH, 10);
        assert_eq!(
            catalog.legal_operators(&rich_state),
            vec![OperatorId::new(0), OperatorId::new(1)]
        );
    }

    #[test]
    fn test_check_rejections() {
        let config = config();
        let catalog = catalog();
        let state = State::new(&config);

        let err = catalog.check(&state, OperatorId::new(0)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::PreconditionFailed));

        let err = catalog.check(&state, OperatorId::new(2)).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&Rejection::NotYourTurn {
                active: RoleId::new(0)
            })
        );

        let err = catalog.check(&state, OperatorId::new(9)).unwrap_err();
        assert_eq!(err, EngineError::UnknownOperator(OperatorId::new(9)));

        assert!(catalog.is_legal(&state, OperatorId::new(1)));
    }

    #[test]
    fn test_terminal_state_has_no_legal_operators() {
        let config = config();
        let catalog = catalog();
        let mut state = State::new(&config);
        state.settle(Outcome::new(GameResult::Draw, "Over"));

        assert!(catalog.legal_operators(&state).is_empty());
        let err = catalog.check(&state, OperatorId::new(1)).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::GameOver));
    }

    #[test]
    fn test_for_role() {
        let catalog = catalog();
        let names: Vec<_> = catalog.for_role(RoleId::new(0)).map(|op| op.name).collect();
        assert_eq!(names, vec!["Spend", "Pass"]);
        assert_eq!(catalog.for_role(RoleId::new(1)).count(), 1);
    }

    #[test]
    #[should_panic(expected = "Duplicate operator ID")]
    fn test_duplicate_ids_rejected() {
        Catalog::new(vec![
            OperatorDef::new(OperatorId::new(0), "A", RoleId::new(0), always, |_| {
                EffectBundle::new("")
            }),
            OperatorDef::new(OperatorId::new(0), "B", RoleId::new(0), always, |_| {
                EffectBundle::new("")
            }),
        ]);
    }
}
