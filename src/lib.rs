//! # stakeholder-sim
//!
//! A deterministic, turn-based, multi-role policy simulation engine.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded metrics, roles or seasons. Games
//!    declare these at startup through `GameConfig` and `ScheduleConfig`.
//!
//! 2. **Immutable Snapshots**: Applying an operator never touches its
//!    input. Every step produces a new `State` sharing structure with the
//!    old one via `im-rs`.
//!
//! 3. **Explicit Context**: Randomness and narration travel in a `Session`
//!    passed to every application. There is no global state.
//!
//! ## Architecture
//!
//! - **Operators as Data**: Each game lists its operators in a `Catalog` of
//!   precondition/transform function pairs.
//!
//! - **Effect Bundles**: Transforms describe their consequences as costs,
//!   deltas and an optional gamble. The `EffectEngine` applies them with
//!   bounds clamping and derived-sum recomputation.
//!
//! - **State Values**: All metrics are `i64`. Fractional quantities use
//!   fixed-point units (e.g. tenths of a percent).
//!
//! ## Modules
//!
//! - `core`: Roles, metrics, flags, state, RNG, narrative, errors
//! - `effects`: Deltas, effect bundles and their resolution
//! - `rules`: Operator catalog, turn scheduler, goals, `Ruleset` trait
//! - `session`: Play context and timelines
//! - `persist`: Saved games (JSON and bincode)
//! - `games`: Coverage Clash and City Without Walls

pub mod core;
pub mod effects;
pub mod games;
pub mod persist;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Bounds, EngineError, FlagId, GameConfig, GameResult, GameRng, GameRngState, InvariantViolation,
    MetricConfig, MetricId, NarrativeEntry, OperatorId, Outcome, RandomSource, Rejection, RoleId,
    RoleRoster, State,
};

pub use crate::effects::{Delta, EffectBundle, EffectEngine, Resolution};

pub use crate::rules::{Catalog, GoalEvaluator, OperatorDef, Ruleset, ScheduleConfig, TurnScheduler};

pub use crate::session::{Session, Timeline};

pub use crate::persist::{PersistError, SavedGame};

pub use crate::games::{CityWithoutWalls, CoverageClash};
