//! Saved games.
//!
//! A [`SavedGame`] bundles a snapshot with the RNG position, so a restored
//! play-through continues exactly where it stopped. Two encodings are
//! supported: JSON (`serde_json`) for inspection and `bincode` for compact
//! storage. The engine does not own a store; callers decide where the bytes go.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameRng, GameRngState, State};
use crate::rules::Ruleset;
use crate::session::Session;

/// Layout version written into every saved game.
pub const FORMAT_VERSION: u32 = 1;

/// Errors from encoding or decoding saved games.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid JSON save: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid binary save: {0}")]
    Binary(#[from] bincode::Error),

    #[error("save format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("save belongs to {found:?}, not {expected:?}")]
    GameMismatch { expected: String, found: String },
}

/// A persisted snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Layout version.
    pub format_version: u32,

    /// Name of the game the state belongs to.
    pub game: String,

    /// The snapshot.
    pub state: State,

    /// RNG position, if the session's source supports capture.
    pub rng: Option<GameRngState>,
}

impl SavedGame {
    /// Bundle a state for saving.
    pub fn new(game: impl Into<String>, state: State, rng: Option<GameRngState>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            game: game.into(),
            state,
            rng,
        }
    }

    /// Capture a state together with the session's RNG position.
    #[must_use]
    pub fn capture<R: Ruleset + ?Sized>(ruleset: &R, state: &State, session: &Session) -> Self {
        Self::new(ruleset.config().name.clone(), state.clone(), session.rng_state())
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let saved: Self = serde_json::from_str(json)?;
        saved.check_version()
    }

    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        let saved: Self = bincode::deserialize(bytes)?;
        saved.check_version()
    }

    /// Unpack for `ruleset`, restoring the RNG if one was captured.
    pub fn restore<R: Ruleset + ?Sized>(
        self,
        ruleset: &R,
    ) -> Result<(State, Option<GameRng>), PersistError> {
        let expected = &ruleset.config().name;
        if &self.game != expected {
            return Err(PersistError::GameMismatch {
                expected: expected.clone(),
                found: self.game,
            });
        }
        let rng = self.rng.as_ref().map(GameRng::from_state);
        Ok((self.state, rng))
    }

    fn check_version(self) -> Result<Self, PersistError> {
        if self.format_version != FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(self)
    }
}
