//! City Without Walls: five stakeholders against urban homelessness.
//!
//! Neighborhoods, businesses, the medical quarter, shelters and the
//! university take turns spending budget and influence on initiatives.
//! Winter kills people sleeping outside, public support decays when nobody
//! does anything useful, and after 24 rounds the homeless total is scored.
//!
//! The homeless total is never written directly: it is the sum of the
//! unsheltered, sheltered and transitional populations.

mod game;
mod operators;

pub use game::CityWithoutWalls;

use crate::core::{FlagId, ListId, MetricId, OperatorId, RoleId};

// === Roles ===

pub const NEIGHBORHOODS: RoleId = RoleId::new(0);
pub const BUSINESS: RoleId = RoleId::new(1);
pub const MEDICAL: RoleId = RoleId::new(2);
pub const SHELTERS: RoleId = RoleId::new(3);
pub const UNIVERSITY: RoleId = RoleId::new(4);
pub const OBSERVER: RoleId = RoleId::new(5);

/// Every stakeholder, in turn order.
pub const STAKEHOLDERS: [RoleId; 5] = [NEIGHBORHOODS, BUSINESS, MEDICAL, SHELTERS, UNIVERSITY];

// === Seasons ===

pub const ROUNDS_PER_SEASON: u32 = 3;
pub const SEASONS: [&str; 4] = ["Winter", "Spring", "Summer", "Fall"];
pub const WINTER: u32 = 0;
pub const SUMMER: u32 = 2;

/// Final scoring happens once the round counter passes this.
pub const FINAL_ROUND: u32 = 24;

/// Homeless total at the start of the game.
pub const BASELINE_HOMELESS: i64 = 10_700;

// === Metrics: citywide ===

/// Derived: unsheltered + sheltered + transitional.
pub const HOMELESS_TOTAL: MetricId = MetricId::new(0);
pub const UNSHELTERED: MetricId = MetricId::new(1);
pub const SHELTERED: MetricId = MetricId::new(2);
pub const TRANSITIONAL: MetricId = MetricId::new(3);
pub const AT_RISK: MetricId = MetricId::new(4);
pub const PUBLIC_SUPPORT: MetricId = MetricId::new(5);
pub const GOV_BUDGET: MetricId = MetricId::new(6);
pub const TRUST: MetricId = MetricId::new(7);
pub const STIGMA: MetricId = MetricId::new(8);
pub const COORDINATION: MetricId = MetricId::new(9);
/// Rent as a share of income, tenths of a percent.
pub const AFFORDABILITY: MetricId = MetricId::new(10);

// === Metrics: Neighborhoods Coalition ===

pub const NEIGH_BUDGET: MetricId = MetricId::new(11);
pub const NEIGH_INFLUENCE: MetricId = MetricId::new(12);
pub const PROPERTY_VALUE: MetricId = MetricId::new(13);
pub const SAFETY: MetricId = MetricId::new(14);
pub const COMPLAINTS: MetricId = MetricId::new(15);

// === Metrics: Business District Association ===

pub const BIZ_BUDGET: MetricId = MetricId::new(16);
pub const BIZ_INFLUENCE: MetricId = MetricId::new(17);
pub const TRAFFIC: MetricId = MetricId::new(18);
pub const CLEANLINESS: MetricId = MetricId::new(19);
pub const REVENUE_IMPACT: MetricId = MetricId::new(20);
pub const BIZ_REPUTATION: MetricId = MetricId::new(21);

// === Metrics: Medical Quarter Consortium ===

pub const MED_BUDGET: MetricId = MetricId::new(22);
pub const MED_INFLUENCE: MetricId = MetricId::new(23);
pub const CLINIC_CAPACITY: MetricId = MetricId::new(24);
pub const PATIENT_VOLUME: MetricId = MetricId::new(25);
pub const HEALTH: MetricId = MetricId::new(26);
pub const BURNOUT: MetricId = MetricId::new(27);

// === Metrics: Shelters & Services Network ===

pub const SHELTER_BUDGET: MetricId = MetricId::new(28);
pub const SHELTER_INFLUENCE: MetricId = MetricId::new(29);
pub const BEDS: MetricId = MetricId::new(30);
pub const OCCUPANCY: MetricId = MetricId::new(31);
pub const VOLUNTEERS: MetricId = MetricId::new(32);
pub const WAITLIST: MetricId = MetricId::new(33);
pub const PLACEMENTS: MetricId = MetricId::new(34);

// === Metrics: University Consortium ===

pub const UNI_BUDGET: MetricId = MetricId::new(35);
pub const UNI_INFLUENCE: MetricId = MetricId::new(36);
pub const RESEARCH_FUNDING: MetricId = MetricId::new(37);
pub const REPUTATION: MetricId = MetricId::new(38);
pub const ENGAGEMENT: MetricId = MetricId::new(39);
pub const PUBLICATIONS: MetricId = MetricId::new(40);

// === Metrics: tracking ===

pub const DEATHS: MetricId = MetricId::new(41);
pub const HUMAN_COST: MetricId = MetricId::new(42);
pub const SWEEPS: MetricId = MetricId::new(43);

// === Flags ===

/// Someone did something constructive this round.
pub const LAST_POSITIVE: FlagId = FlagId::new(0);
/// The pilot intervention has been launched.
pub const PILOT_LAUNCHED: FlagId = FlagId::new(1);

// === Lists ===

pub const RESEARCH_PROJECTS: ListId = ListId::new(0);

// === Operators ===

pub const MEDIA_CAMPAIGN: OperatorId = OperatorId::new(0);
pub const PRIVATE_SECURITY: OperatorId = OperatorId::new(1);
pub const NEIGHBORHOOD_OUTREACH: OperatorId = OperatorId::new(2);
pub const COMMUNITY_FORUMS: OperatorId = OperatorId::new(3);
pub const CITY_SWEEPS: OperatorId = OperatorId::new(4);
pub const JOB_READINESS: OperatorId = OperatorId::new(5);
pub const STREET_AMBASSADORS: OperatorId = OperatorId::new(6);
pub const AFFORDABLE_HOUSING: OperatorId = OperatorId::new(7);
pub const HEALTH_CLINIC: OperatorId = OperatorId::new(8);
pub const MENTAL_HEALTH: OperatorId = OperatorId::new(9);
pub const MEDICAL_RESPITE: OperatorId = OperatorId::new(10);
pub const MOBILE_OUTREACH: OperatorId = OperatorId::new(11);
pub const VOLUNTEER_DRIVE: OperatorId = OperatorId::new(12);
pub const EXPAND_SHELTER: OperatorId = OperatorId::new(13);
pub const HOUSING_NAVIGATION: OperatorId = OperatorId::new(14);
pub const SUPPORTIVE_HOUSING: OperatorId = OperatorId::new(15);
pub const RESEARCH_PARTNERSHIP: OperatorId = OperatorId::new(16);
pub const STUDENT_OUTREACH: OperatorId = OperatorId::new(17);
pub const POLICY_RESEARCH: OperatorId = OperatorId::new(18);
pub const PILOT_INTERVENTION: OperatorId = OperatorId::new(19);
pub const ACADEMIC_FORUMS: OperatorId = OperatorId::new(20);
pub const DATA_DASHBOARD: OperatorId = OperatorId::new(21);
pub const NEIGHBORHOODS_HOLD: OperatorId = OperatorId::new(22);
pub const BUSINESS_HOLD: OperatorId = OperatorId::new(23);
pub const MEDICAL_HOLD: OperatorId = OperatorId::new(24);
pub const SHELTERS_HOLD: OperatorId = OperatorId::new(25);
pub const UNIVERSITY_HOLD: OperatorId = OperatorId::new(26);
