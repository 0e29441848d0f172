//! Operator identity and transition records.
//!
//! An operator is one entry in a game's fixed catalog (see
//! [`crate::rules::Catalog`]). The engine never interprets operator IDs -
//! it only stores and compares them.

use serde::{Deserialize, Serialize};

use super::role::RoleId;

/// Operator identifier (position in the game's catalog).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub u16);

impl OperatorId {
    /// Create a new operator ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Operator({})", self.0)
    }
}

/// The operator application that produced a snapshot.
///
/// Used for replay/debugging and role views ("last move").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The role that applied the operator.
    pub role: RoleId,

    /// The operator applied.
    pub operator: OperatorId,

    /// Step count after the application.
    pub step: u32,

    /// Round in which the operator was applied.
    pub round: u32,
}

impl TransitionRecord {
    /// Create a new transition record.
    #[must_use]
    pub fn new(role: RoleId, operator: OperatorId, step: u32, round: u32) -> Self {
        Self {
            role,
            operator,
            step,
            round,
        }
    }
}
