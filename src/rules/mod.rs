//! Rules: operator catalog, turn scheduling, goals, and the `Ruleset` trait.
//!
//! Games implement `Ruleset` by supplying data; the engine provides
//! legality, application, termination and role views.

mod catalog;
mod engine;
mod goal;
mod scheduler;

pub use catalog::{always, Catalog, OperatorDef, Precondition, Transform};
pub use engine::Ruleset;
pub use goal::{GoalCheck, GoalEvaluator, GoalRule};
pub use scheduler::{
    BonusRule, Cadence, PeriodicEffect, PeriodicRule, ScheduleConfig, TurnDecision, TurnScheduler,
};
