//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - `MetricConfig`: scalar metrics, their ranges and display units
//! - `FlagConfig`: transient and one-time flags
//! - `ListConfig`: append-only text lists
//! - `DerivedConfig`: aggregates recomputed from their parts
//! - `HistoryConfig`: the trailing window of one tracked metric
//! - `GameConfig`: combines all of the above with the role roster
//!
//! The engine never hardcodes metrics or flags - games define them.
//! All identifiers are dense: the Nth declared metric must have ID N.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::role::{RoleId, RoleRoster};

/// Metric identifier. Games define what metrics exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricId(pub u16);

impl MetricId {
    /// Create a new metric ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Metric({})", self.0)
    }
}

/// Legal range of a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bounds {
    /// Inclusive range, e.g. a percentage in `[0, 100]`.
    Range { min: i64, max: i64 },
    /// Lower bound only, e.g. a population count.
    AtLeast(i64),
    /// No bound, e.g. a budget that may carry debt.
    Unbounded,
}

impl Bounds {
    /// The common `[0, 100]` range.
    pub const PERCENT: Self = Self::Range { min: 0, max: 100 };

    /// Non-negative values.
    pub const NON_NEGATIVE: Self = Self::AtLeast(0);

    /// Create an inclusive range.
    #[must_use]
    pub const fn range(min: i64, max: i64) -> Self {
        assert!(min <= max, "Bounds min must not exceed max");
        Self::Range { min, max }
    }

    /// Saturate a value into this range.
    #[must_use]
    pub fn clamp(self, value: i64) -> i64 {
        match self {
            Self::Range { min, max } => value.clamp(min, max),
            Self::AtLeast(min) => value.max(min),
            Self::Unbounded => value,
        }
    }

    /// Check whether a value lies in this range.
    #[must_use]
    pub fn contains(self, value: i64) -> bool {
        match self {
            Self::Range { min, max } => (min..=max).contains(&value),
            Self::AtLeast(min) => value >= min,
            Self::Unbounded => true,
        }
    }

    /// The lowest legal value, if any.
    #[must_use]
    pub fn floor(self) -> Option<i64> {
        match self {
            Self::Range { min, .. } | Self::AtLeast(min) => Some(min),
            Self::Unbounded => None,
        }
    }
}

/// How a metric is displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Plain number with thousands separators: `10,700`.
    #[default]
    Count,
    /// Whole percentage: `50%`.
    Percent,
    /// Fixed-point tenths of a percent: `133` renders as `13.3%`.
    TenthsPercent,
    /// Dollar amount: `$750,000`.
    Dollars,
    /// Billions of dollars: `$65 billion`.
    Billions,
    /// Score out of 100: `42/100`.
    Score,
}

impl Unit {
    /// Render a value in this unit.
    #[must_use]
    pub fn format(self, value: i64) -> String {
        match self {
            Self::Count => group_thousands(value),
            Self::Percent => format!("{value}%"),
            Self::TenthsPercent => {
                let sign = if value < 0 { "-" } else { "" };
                let abs = value.unsigned_abs();
                format!("{sign}{}.{}%", abs / 10, abs % 10)
            }
            Self::Dollars => {
                if value < 0 {
                    format!("-${}", group_thousands(value.saturating_abs()))
                } else {
                    format!("${}", group_thousands(value))
                }
            }
            Self::Billions => format!("${value} billion"),
            Self::Score => format!("{value}/100"),
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Configuration for a single metric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Unique identifier for this metric.
    pub id: MetricId,

    /// Human-readable name (for narration and views).
    pub name: String,

    /// Legal range; every write is clamped into it.
    pub bounds: Bounds,

    /// Display unit.
    pub unit: Unit,

    /// Starting value.
    pub initial: i64,

    /// Cumulative counters only ever increase.
    pub cumulative: bool,
}

impl MetricConfig {
    /// Create a new unbounded metric.
    pub fn new(id: MetricId, name: impl Into<String>, initial: i64) -> Self {
        Self {
            id,
            name: name.into(),
            bounds: Bounds::Unbounded,
            unit: Unit::Count,
            initial,
            cumulative: false,
        }
    }

    /// Set the legal range.
    #[must_use]
    pub fn bounded(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Shorthand for a `[0, 100]` percentage.
    #[must_use]
    pub fn percent(self) -> Self {
        self.bounded(Bounds::PERCENT).with_unit(Unit::Percent)
    }

    /// Set the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Mark as a cumulative (never decreasing, non-negative) counter.
    #[must_use]
    pub fn cumulative(mut self) -> Self {
        self.cumulative = true;
        self.bounds = Bounds::NON_NEGATIVE;
        self
    }
}

/// Flag identifier. Games define what flags exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlagId(pub u16);

impl FlagId {
    /// Create a new flag ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FlagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Flag({})", self.0)
    }
}

/// Lifetime rules for a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagKind {
    /// Single-use; consumed by the turn scheduler (e.g. "skip next turn").
    OneShot,
    /// One-time marker: false to true exactly once, never reverts.
    Latch,
    /// Special-choice menu; cleared when its owner hands the turn over.
    Menu { owner: RoleId },
    /// Cleared whenever a new round begins.
    Round,
}

/// Configuration for a single flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagConfig {
    /// Unique identifier.
    pub id: FlagId,
    /// Human-readable name.
    pub name: String,
    /// Lifetime rules.
    pub kind: FlagKind,
    /// Starting value.
    pub initial: bool,
}

impl FlagConfig {
    /// Create a flag that starts unset.
    pub fn new(id: FlagId, name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            initial: false,
        }
    }

    /// Start with the flag set.
    #[must_use]
    pub fn initially_set(mut self) -> Self {
        self.initial = true;
        self
    }
}

/// List identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListId(pub u16);

impl ListId {
    /// Create a new list ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Configuration for an append-only text list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Unique identifier.
    pub id: ListId,
    /// Human-readable name.
    pub name: String,
}

/// An aggregate recomputed as the sum of its parts after every mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedConfig {
    /// The aggregate metric (never written directly by operators).
    pub target: MetricId,
    /// The parts it sums.
    pub parts: SmallVec<[MetricId; 4]>,
}

/// Trailing window of one metric, kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Tracked metric.
    pub metric: MetricId,
    /// Maximum number of readings kept.
    pub window: usize,
}

/// Complete game configuration.
///
/// Games provide this at startup to configure the engine.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Game name (also stamped into saved games).
    pub name: String,

    /// Role roster.
    pub roster: RoleRoster,

    /// Metric configurations, indexed by ID.
    pub metrics: Vec<MetricConfig>,

    /// Flag configurations, indexed by ID.
    pub flags: Vec<FlagConfig>,

    /// List configurations, indexed by ID.
    pub lists: Vec<ListConfig>,

    /// Derived aggregates.
    pub derived: Vec<DerivedConfig>,

    /// Optional trailing history.
    pub history: Option<HistoryConfig>,
}

impl GameConfig {
    /// Create a new game configuration.
    pub fn new(name: impl Into<String>, roster: RoleRoster) -> Self {
        Self {
            name: name.into(),
            roster,
            metrics: Vec::new(),
            flags: Vec::new(),
            lists: Vec::new(),
            derived: Vec::new(),
            history: None,
        }
    }

    /// Add a metric configuration.
    #[must_use]
    pub fn with_metric(mut self, metric: MetricConfig) -> Self {
        assert_eq!(metric.id.index(), self.metrics.len(), "Metric IDs must be dense and ordered");
        assert!(
            metric.bounds.contains(metric.initial),
            "Initial value of {} is out of bounds",
            metric.name
        );
        self.metrics.push(metric);
        self
    }

    /// Add a flag configuration.
    #[must_use]
    pub fn with_flag(mut self, flag: FlagConfig) -> Self {
        assert_eq!(flag.id.index(), self.flags.len(), "Flag IDs must be dense and ordered");
        self.flags.push(flag);
        self
    }

    /// Add a list configuration.
    #[must_use]
    pub fn with_list(mut self, list: ListConfig) -> Self {
        assert_eq!(list.id.index(), self.lists.len(), "List IDs must be dense and ordered");
        self.lists.push(list);
        self
    }

    /// Declare `target` as the sum of `parts`.
    #[must_use]
    pub fn with_derived(mut self, target: MetricId, parts: &[MetricId]) -> Self {
        assert!(!parts.contains(&target), "A derived metric cannot be its own part");
        self.derived.push(DerivedConfig {
            target,
            parts: SmallVec::from_slice(parts),
        });
        self
    }

    /// Keep a trailing window of `metric`.
    #[must_use]
    pub fn with_history(mut self, metric: MetricId, window: usize) -> Self {
        assert!(window > 0, "History window must hold at least one reading");
        self.history = Some(HistoryConfig { metric, window });
        self
    }

    /// Get a metric config by ID.
    #[must_use]
    pub fn metric(&self, id: MetricId) -> Option<&MetricConfig> {
        self.metrics.get(id.index())
    }

    /// Display name of a metric.
    #[must_use]
    pub fn metric_name(&self, id: MetricId) -> &str {
        self.metric(id).map_or("unknown metric", |m| m.name.as_str())
    }

    /// Format a value in a metric's unit.
    #[must_use]
    pub fn format_metric(&self, id: MetricId, value: i64) -> String {
        self.metric(id).map_or_else(|| value.to_string(), |m| m.unit.format(value))
    }

    /// Get a flag config by ID.
    #[must_use]
    pub fn flag(&self, id: FlagId) -> Option<&FlagConfig> {
        self.flags.get(id.index())
    }

    /// Check whether a metric is a derived aggregate.
    #[must_use]
    pub fn is_derived(&self, id: MetricId) -> bool {
        self.derived.iter().any(|d| d.target == id)
    }
}
