//! Engine error types.

use thiserror::Error;

use super::action::OperatorId;
use super::config::MetricId;
use super::role::RoleId;

/// Why a catalog operator was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,

    #[error("it is {active}'s turn")]
    NotYourTurn { active: RoleId },

    #[error("its precondition does not hold")]
    PreconditionFailed,
}

/// Errors from applying operators.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{name} ({operator}) is not legal: {reason}")]
    IllegalOperator {
        operator: OperatorId,
        name: String,
        reason: Rejection,
    },

    #[error("{0} is not in the catalog")]
    UnknownOperator(OperatorId),
}

impl EngineError {
    /// The rejection reason, if this is an illegal-operator error.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::IllegalOperator { reason, .. } => Some(reason),
            Self::UnknownOperator(_) => None,
        }
    }
}

/// A state that breaks one of the engine's structural guarantees.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{metric} = {value} is outside its bounds")]
    OutOfBounds { metric: MetricId, value: i64 },

    #[error("active role {0} is not an acting role")]
    InactiveRole(RoleId),

    #[error("derived {target} = {stored} but its parts sum to {expected}")]
    DerivedMismatch {
        target: MetricId,
        stored: i64,
        expected: i64,
    },

    #[error("store shape does not match the game config: {0}")]
    ShapeMismatch(&'static str),

    #[error("round {0} is below 1")]
    RoundUnderflow(u32),
}
