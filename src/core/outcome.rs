//! Terminal outcomes.

use serde::{Deserialize, Serialize};

use super::role::RoleId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(RoleId),
    /// Multiple winners (shared victory).
    Winners(Vec<RoleId>),
    /// Neither side prevailed, but the game did not fail.
    Draw,
    /// Everyone lost.
    NoWinner,
}

impl GameResult {
    /// Check if a role won.
    #[must_use]
    pub fn is_winner(&self, role: RoleId) -> bool {
        match self {
            GameResult::Winner(r) => *r == role,
            GameResult::Winners(rs) => rs.contains(&role),
            GameResult::Draw | GameResult::NoWinner => false,
        }
    }
}

/// A terminal result plus the message shown to every role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Display message.
    pub message: String,
    /// Who won.
    pub result: GameResult,
}

impl Outcome {
    /// Create a new outcome.
    pub fn new(result: GameResult, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            result,
        }
    }

    /// The single winning role, if exactly one role won.
    #[must_use]
    pub fn winner(&self) -> Option<RoleId> {
        match self.result {
            GameResult::Winner(role) => Some(role),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(RoleId::new(1));
        assert!(!result.is_winner(RoleId::new(0)));
        assert!(result.is_winner(RoleId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(RoleId::new(0)));

        let nobody = GameResult::NoWinner;
        assert!(!nobody.is_winner(RoleId::new(1)));

        let team = GameResult::Winners(vec![RoleId::new(0), RoleId::new(2)]);
        assert!(team.is_winner(RoleId::new(0)));
        assert!(!team.is_winner(RoleId::new(1)));
        assert!(team.is_winner(RoleId::new(2)));
    }

    #[test]
    fn test_outcome_winner() {
        let single = Outcome::new(GameResult::Winner(RoleId::new(1)), "Role 1 wins");
        assert_eq!(single.winner(), Some(RoleId::new(1)));

        let shared = Outcome::new(GameResult::Winners(vec![RoleId::new(0)]), "Everyone wins");
        assert_eq!(shared.winner(), None);
    }
}
