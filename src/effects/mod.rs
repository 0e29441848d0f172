//! Effect system for operator outcomes.
//!
//! Effects are the building blocks of operator transforms:
//! - `Delta`: Enumeration of game-agnostic world changes
//! - `EffectBundle`: Costs, deltas, a stochastic branch and a shortfall branch
//! - `EffectEngine`: Applies bundles to successor snapshots
//!
//! ## Design Philosophy
//!
//! The effect system is intentionally simple and game-agnostic.
//! Effects operate on generic concepts:
//! - Add to, scale, set or move metric values
//! - Toggle flags
//! - Append to lists
//!
//! Games define the meaning of these operations through their
//! metric and flag configurations.

mod effect;
mod engine;

pub use effect::{Cost, Delta, EffectBundle, Gamble};
pub use engine::{EffectEngine, Resolution, Resolved};
