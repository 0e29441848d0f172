//! Randomness for stochastic operator branches.
//!
//! The effect engine draws through [`RandomSource`] and never touches an
//! ambient generator. Production play uses [`GameRng`], a seeded ChaCha8
//! stream whose position can be saved and restored. Tests use
//! [`ScriptedRandom`] to force a branch.
//!
//! ```
//! use stakeholder_sim::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let draws_a: Vec<bool> = (0..16).map(|_| a.chance(0.5)).collect();
//! let draws_b: Vec<bool> = (0..16).map(|_| b.chance(0.5)).collect();
//! assert_eq!(draws_a, draws_b);
//! ```

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness for stochastic effect branches.
pub trait RandomSource {
    /// `true` with the given probability, clamped to `[0, 1]`.
    fn chance(&mut self, probability: f64) -> bool;

    /// Generator position for saved games. Scripted sources have none.
    fn snapshot(&self) -> Option<GameRngState> {
        None
    }
}

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Start a stream from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the OS. [`GameRng::seed`] still reports the seed, so the
    /// play-through can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform pick from `options`; `None` when empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.stream)
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(saved: &GameRngState) -> Self {
        let mut rng = Self::new(saved.seed);
        rng.stream.set_word_pos(saved.word_pos);
        rng
    }
}

impl RandomSource for GameRng {
    fn chance(&mut self, probability: f64) -> bool {
        self.stream.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn snapshot(&self) -> Option<GameRngState> {
        Some(self.state())
    }
}

/// Saved position of a [`GameRng`]: the seed plus the ChaCha word counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream started from.
    pub seed: u64,
    /// ChaCha8 word counter.
    pub word_pos: u128,
}

/// Replays a fixed list of outcomes, then returns `fallback` forever.
///
/// The requested probability is ignored.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    script: VecDeque<bool>,
    fallback: bool,
    draws: usize,
}

impl ScriptedRandom {
    /// Replay `script` in order, then return `false`.
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Return `outcome` on every draw.
    #[must_use]
    pub fn always(outcome: bool) -> Self {
        Self {
            fallback: outcome,
            ..Self::default()
        }
    }

    /// Draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&mut self, _probability: f64) -> bool {
        self.draws += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
