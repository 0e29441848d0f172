//! Coverage Clash: a two-sided healthcare policy game.
//!
//! A Policy Maker tries to close the healthcare access gap while an
//! Insurance Company chases profit:
//! - The Policy Maker spends budget on coverage programs
//! - The Insurer trades public health for profit and influence
//! - Intercepted funding requests open a bribe menu for the Insurer
//! - Lobbying costs the Policy Maker a turn
//! - High public trust grants the Policy Maker bonus turns
//!
//! The game ends when the access gap closes, profit runs away, or the
//! system collapses.

mod game;
mod operators;

pub use game::CoverageClash;

use crate::core::{FlagId, MetricId, OperatorId, RoleId};

// === Roles ===

/// Policy Maker.
pub const POLICY_MAKER: RoleId = RoleId::new(0);
/// Insurance Company.
pub const INSURER: RoleId = RoleId::new(1);
/// Non-acting observers.
pub const OBSERVER: RoleId = RoleId::new(2);

// === Metrics ===

/// Uninsured rate, tenths of a percent.
pub const UNINSURED: MetricId = MetricId::new(0);
/// Public health index.
pub const HEALTH: MetricId = MetricId::new(1);
/// Access gap between income groups (lower is better for the Policy Maker).
pub const ACCESS_GAP: MetricId = MetricId::new(2);
/// Insurer profit, billions.
pub const PROFIT: MetricId = MetricId::new(3);
/// Public trust in the Policy Maker.
pub const TRUST: MetricId = MetricId::new(4);
/// Insurer influence.
pub const INFLUENCE: MetricId = MetricId::new(5);
/// Policy Maker budget, billions.
pub const BUDGET: MetricId = MetricId::new(6);
/// Turns left during which premiums cannot rise.
pub const PREMIUM_CAP_TURNS: MetricId = MetricId::new(7);
/// Turns left during which public coverage cannot expand.
pub const EXPANSION_CAP_TURNS: MetricId = MetricId::new(8);
/// Insurer turns since the last lobbying push.
pub const TURNS_SINCE_LOBBY: MetricId = MetricId::new(9);
/// Funding requests made.
pub const FUNDS_REQUESTED: MetricId = MetricId::new(10);
/// Funding requests intercepted.
pub const FUNDS_INTERCEPTED: MetricId = MetricId::new(11);

// === Flags ===

/// The next hand-over is skipped.
pub const SKIP_NEXT_TURN: FlagId = FlagId::new(0);
/// Intercepted funds are available to the Insurer.
pub const BRIBE_MENU: FlagId = FlagId::new(1);
/// Bonus turn at 72% trust spent.
pub const BONUS_72: FlagId = FlagId::new(2);
/// Bonus turn at 62% trust spent.
pub const BONUS_62: FlagId = FlagId::new(3);
/// Bonus turn at 55% trust spent.
pub const BONUS_55: FlagId = FlagId::new(4);

// === Operators ===

pub const EXPAND_PUBLIC_COVERAGE: OperatorId = OperatorId::new(0);
pub const SUBSIDIZE_COVERAGE: OperatorId = OperatorId::new(1);
pub const REQUEST_FUNDS: OperatorId = OperatorId::new(2);
pub const CAP_PREMIUMS: OperatorId = OperatorId::new(3);
pub const MANDATE_COVERAGE: OperatorId = OperatorId::new(4);
pub const INVEST_IN_CLINICS: OperatorId = OperatorId::new(5);
pub const POLICY_MAKER_PASS: OperatorId = OperatorId::new(6);
pub const RAISE_PREMIUMS: OperatorId = OperatorId::new(7);
pub const RISK_SELECTION: OperatorId = OperatorId::new(8);
pub const NARROW_NETWORK: OperatorId = OperatorId::new(9);
pub const LOBBY_GOVERNMENT: OperatorId = OperatorId::new(10);
pub const MISINFORMATION: OperatorId = OperatorId::new(11);
pub const BRIBE_PREVENT_EXPANSION: OperatorId = OperatorId::new(12);
pub const BRIBE_FUND_MISINFORMATION: OperatorId = OperatorId::new(13);
pub const INSURER_PASS: OperatorId = OperatorId::new(14);
