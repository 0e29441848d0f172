//! Role identification and the fixed role roster.
//!
//! ## RoleId
//!
//! Type-safe role identifier supporting 1-255 roles.
//!
//! ## RoleRoster
//!
//! The ordered list of roles a game declares. Acting roles form the fixed
//! turn cycle; non-acting roles (observers) exist only for occupancy and
//! role-filtered views. The roster is supplied by the game and read-only
//! to the engine.

use serde::{Deserialize, Serialize};

/// Role identifier supporting 1-255 roles.
///
/// Role indices are 0-based and match the declaration order in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u8);

impl RoleId {
    /// Create a new role ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw role index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Role {}", self.0)
    }
}

/// Configuration for a single role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Role identifier (must equal its position in the roster).
    pub id: RoleId,

    /// Human-readable name.
    pub name: String,

    /// Minimum number of participants occupying this role.
    pub min_occupants: u32,

    /// Maximum number of participants occupying this role.
    pub max_occupants: u32,

    /// Whether the role takes part in the turn cycle.
    pub acts: bool,
}

impl RoleConfig {
    /// Create an acting role with exactly one occupant.
    pub fn acting(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            min_occupants: 1,
            max_occupants: 1,
            acts: true,
        }
    }

    /// Create a non-acting observer role.
    pub fn observer(id: RoleId, name: impl Into<String>, max_occupants: u32) -> Self {
        Self {
            id,
            name: name.into(),
            min_occupants: 0,
            max_occupants,
            acts: false,
        }
    }

    /// Set the occupancy range.
    #[must_use]
    pub fn with_occupancy(mut self, min: u32, max: u32) -> Self {
        assert!(min <= max, "Role occupancy min must not exceed max");
        self.min_occupants = min;
        self.max_occupants = max;
        self
    }
}

/// The fixed set of roles for a game.
///
/// ## Example
///
/// ```
/// use stakeholder_sim::core::{RoleConfig, RoleId, RoleRoster};
///
/// let roster = RoleRoster::new(vec![
///     RoleConfig::acting(RoleId::new(0), "North"),
///     RoleConfig::acting(RoleId::new(1), "South"),
///     RoleConfig::observer(RoleId::new(2), "Observer", 25),
/// ]);
///
/// assert_eq!(roster.first(), RoleId::new(0));
/// assert_eq!(roster.next_after(RoleId::new(1)), RoleId::new(0));
/// assert!(!roster.is_acting(RoleId::new(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRoster {
    roles: Vec<RoleConfig>,
}

impl RoleRoster {
    /// Create a roster from role configurations.
    ///
    /// Role IDs must be dense and in declaration order, and at least one
    /// role must act.
    pub fn new(roles: Vec<RoleConfig>) -> Self {
        assert!(!roles.is_empty(), "Must have at least 1 role");
        assert!(roles.len() <= 255, "At most 255 roles supported");
        for (i, role) in roles.iter().enumerate() {
            assert_eq!(role.id.index(), i, "Role IDs must be dense and ordered");
        }
        assert!(roles.iter().any(|r| r.acts), "At least one role must act");

        Self { roles }
    }

    /// Number of declared roles (acting and observing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Rosters are never empty; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Get a role's configuration.
    #[must_use]
    pub fn get(&self, role: RoleId) -> Option<&RoleConfig> {
        self.roles.get(role.index())
    }

    /// Get a role's display name, falling back to its ID.
    #[must_use]
    pub fn name(&self, role: RoleId) -> String {
        self.get(role)
            .map_or_else(|| role.to_string(), |r| r.name.clone())
    }

    /// Occupancy range `(min, max)` for a role.
    #[must_use]
    pub fn occupancy(&self, role: RoleId) -> Option<(u32, u32)> {
        self.get(role).map(|r| (r.min_occupants, r.max_occupants))
    }

    /// Check whether a role takes part in the turn cycle.
    #[must_use]
    pub fn is_acting(&self, role: RoleId) -> bool {
        self.get(role).is_some_and(|r| r.acts)
    }

    /// Iterate over all roles.
    pub fn iter(&self) -> impl Iterator<Item = &RoleConfig> {
        self.roles.iter()
    }

    /// Iterate over acting roles in cycle order.
    pub fn cycle(&self) -> impl Iterator<Item = RoleId> + '_ {
        self.roles.iter().filter(|r| r.acts).map(|r| r.id)
    }

    /// The first acting role; it opens every round.
    #[must_use]
    pub fn first(&self) -> RoleId {
        self.cycle().next().unwrap_or(RoleId::new(0))
    }

    /// The acting role that follows `role` in the cycle, wrapping around.
    ///
    /// A non-acting role hands over to the first acting role after it.
    #[must_use]
    pub fn next_after(&self, role: RoleId) -> RoleId {
        self.roles
            .iter()
            .skip(role.index() + 1)
            .find(|r| r.acts)
            .map_or_else(|| self.first(), |r| r.id)
    }
}
