//! Core engine types: roles, configuration, stores, state, narrative, RNG.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games configure these via `GameConfig` rather than modifying the core.

pub mod role;
pub mod rng;
pub mod config;
pub mod metrics;
pub mod action;
pub mod outcome;
pub mod narrative;
pub mod error;
pub mod state;

pub use role::{RoleConfig, RoleId, RoleRoster};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRandom};
pub use config::{
    Bounds, DerivedConfig, FlagConfig, FlagId, FlagKind, GameConfig, HistoryConfig, ListConfig,
    ListId, MetricConfig, MetricId, Unit,
};
pub use metrics::{FlagSlot, FlagStore, MetricSlot, MetricStore};
pub use action::{OperatorId, TransitionRecord};
pub use outcome::{GameResult, Outcome};
pub use narrative::{EntryKind, NarrativeEntry, NarrativeSink, NullSink, TracingSink};
pub use error::{EngineError, InvariantViolation, Rejection};
pub use state::State;
