//! City Without Walls configuration, schedule and goals.

use crate::core::{
    Bounds, FlagConfig, FlagKind, GameConfig, GameResult, ListConfig, MetricConfig, MetricId,
    Outcome, RoleConfig, RoleId, RoleRoster, State, Unit,
};
use crate::effects::Delta;
use crate::rules::{
    Cadence, Catalog, GoalEvaluator, GoalRule, PeriodicRule, Ruleset, ScheduleConfig,
};

use super::operators;
use super::*;

/// Trailing readings of the homeless total shown in role views.
const HISTORY_WINDOW: usize = 12;

/// Volunteer attrition cadence, in steps.
const ATTRITION_INTERVAL: u32 = 4;

/// Winter deaths only occur above this many unsheltered people.
const WINTER_EXPOSURE_THRESHOLD: i64 = 3_000;

/// The City Without Walls ruleset.
///
/// ## Example
///
/// ```
/// use stakeholder_sim::games::city_without_walls::{self as city, CityWithoutWalls};
/// use stakeholder_sim::rules::Ruleset;
/// use stakeholder_sim::session::Session;
///
/// let game = CityWithoutWalls::new();
/// let mut session = Session::seeded(3);
/// let state = game.initial_state();
/// assert_eq!(state.metric(city::HOMELESS_TOTAL), 10_700);
///
/// let next = game
///     .apply(&mut session, &state, city::NEIGHBORHOOD_OUTREACH)
///     .unwrap();
/// assert_eq!(next.metric(city::UNSHELTERED), 4500 - 540);
/// assert_eq!(next.metric(city::HOMELESS_TOTAL), 10_700);
/// assert_eq!(next.active_role(), city::BUSINESS);
/// ```
#[derive(Clone, Debug)]
pub struct CityWithoutWalls {
    config: GameConfig,
    schedule: ScheduleConfig,
    catalog: Catalog,
    goals: GoalEvaluator,
}

impl CityWithoutWalls {
    /// Create the game with its standard starting values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: config(),
            schedule: schedule(),
            catalog: operators::catalog(),
            goals: goals(),
        }
    }
}

impl Default for CityWithoutWalls {
    fn default() -> Self {
        Self::new()
    }
}

impl Ruleset for CityWithoutWalls {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn goals(&self) -> &GoalEvaluator {
        &self.goals
    }

    fn briefing(&self, state: &State, viewer: RoleId) -> Vec<String> {
        let m = |id: MetricId| state.metric(id);
        let mut lines = vec![format!(
            "Round {}/{FINAL_ROUND}: work toward a 15% reduction in homelessness.",
            state.round()
        )];

        match viewer {
            NEIGHBORHOODS => {
                lines.push(format!("GOAL: Property Values > 95 (currently {})", m(PROPERTY_VALUE)));
                lines.push("GOAL: Reduce visible homelessness in residential zones by 30%".to_owned());
                lines.push(format!("GOAL: Safety Perception > 60 (currently {})", m(SAFETY)));
                if m(COMPLAINTS) > 30 {
                    lines.push(format!("WARNING: High complaint rate ({}/month)", m(COMPLAINTS)));
                }
            }
            BUSINESS => {
                lines.push(format!("GOAL: Customer Traffic > 95 (currently {})", m(TRAFFIC)));
                lines.push(format!("GOAL: Cleanliness Index > 75 (currently {})", m(CLEANLINESS)));
                lines.push(format!(
                    "GOAL: Revenue Impact > -$200,000 (currently {})",
                    Unit::Dollars.format(m(REVENUE_IMPACT))
                ));
                if m(CLEANLINESS) < 55 {
                    lines.push("WARNING: Cleanliness concerns affecting business".to_owned());
                }
            }
            MEDICAL => {
                lines.push(format!("GOAL: Health Index 65+ (currently {})", m(HEALTH)));
                lines.push("GOAL: Treat at least 400 unique patients".to_owned());
                lines.push(format!("GOAL: Staff Burnout < 50% (currently {}%)", m(BURNOUT)));
                if m(BURNOUT) > 60 {
                    lines.push("WARNING: Staff burnout critical!".to_owned());
                }
            }
            SHELTERS => {
                lines.push(format!("GOAL: Waitlist < 150 (currently {})", m(WAITLIST)));
                lines.push(format!(
                    "GOAL: Increase Bed Capacity by 30% (currently {}, started at 3,800)",
                    m(BEDS)
                ));
                lines.push(format!(
                    "GOAL: 400+ Housing Placements (currently {})",
                    m(PLACEMENTS)
                ));
                if m(WAITLIST) > 500 {
                    lines.push("CRISIS: Waitlist exceeds capacity!".to_owned());
                }
            }
            UNIVERSITY => {
                lines.push(format!("GOAL: Publish 3 research findings (currently {})", m(PUBLICATIONS)));
                lines.push(format!("GOAL: Reputation > 70 (currently {})", m(REPUTATION)));
                lines.push(format!("GOAL: Community Engagement > 65 (currently {})", m(ENGAGEMENT)));
                if m(REPUTATION) < 65 {
                    lines.push("WARNING: Reputation at risk".to_owned());
                }
            }
            _ => return Vec::new(),
        }
        lines
    }
}

pub(super) fn config() -> GameConfig {
    let roster = RoleRoster::new(vec![
        RoleConfig::acting(NEIGHBORHOODS, "Neighborhoods Coalition"),
        RoleConfig::acting(BUSINESS, "Business District Association"),
        RoleConfig::acting(MEDICAL, "Medical Quarter Consortium"),
        RoleConfig::acting(SHELTERS, "Shelters & Services Network"),
        RoleConfig::acting(UNIVERSITY, "University Consortium"),
        RoleConfig::observer(OBSERVER, "Observer", 25),
    ]);

    let count = |id, name: &str, initial| {
        MetricConfig::new(id, name, initial).bounded(Bounds::NON_NEGATIVE)
    };
    let index = |id, name: &str, initial| MetricConfig::new(id, name, initial).bounded(Bounds::PERCENT);
    let dollars = |id, name: &str, initial| count(id, name, initial).with_unit(Unit::Dollars);

    GameConfig::new("City Without Walls", roster)
        // Citywide
        .with_metric(count(HOMELESS_TOTAL, "Total Homeless", BASELINE_HOMELESS))
        .with_metric(count(UNSHELTERED, "Unsheltered", 4_500))
        .with_metric(count(SHELTERED, "Sheltered", 3_800))
        .with_metric(count(TRANSITIONAL, "Transitional", 2_400))
        .with_metric(count(AT_RISK, "At-Risk Population", 38_000))
        .with_metric(MetricConfig::new(PUBLIC_SUPPORT, "Public Support", 50).percent())
        .with_metric(dollars(GOV_BUDGET, "Government Budget", 1_200_000))
        .with_metric(index(TRUST, "Trust Index", 42).with_unit(Unit::Score))
        .with_metric(index(STIGMA, "Stigma Index", 68))
        .with_metric(MetricConfig::new(COORDINATION, "Service Coordination", 35).percent())
        .with_metric(
            MetricConfig::new(AFFORDABILITY, "Housing Affordability", 385)
                .bounded(Bounds::range(0, 1000))
                .with_unit(Unit::TenthsPercent),
        )
        // Neighborhoods Coalition
        .with_metric(dollars(NEIGH_BUDGET, "Neighborhoods Budget", 750_000))
        .with_metric(index(NEIGH_INFLUENCE, "Neighborhoods Influence", 65))
        .with_metric(
            MetricConfig::new(PROPERTY_VALUE, "Property Value Index", 100)
                .bounded(Bounds::range(0, 150)),
        )
        .with_metric(index(SAFETY, "Safety Perception", 45))
        .with_metric(count(COMPLAINTS, "Complaint Rate", 22))
        // Business District Association
        .with_metric(dollars(BIZ_BUDGET, "Business Budget", 900_000))
        .with_metric(index(BIZ_INFLUENCE, "Business Influence", 70))
        .with_metric(
            MetricConfig::new(TRAFFIC, "Customer Traffic", 100).bounded(Bounds::range(0, 150)),
        )
        .with_metric(index(CLEANLINESS, "Cleanliness Index", 52))
        .with_metric(MetricConfig::new(REVENUE_IMPACT, "Revenue Impact", 0).with_unit(Unit::Dollars))
        .with_metric(index(BIZ_REPUTATION, "Business Reputation", 50))
        // Medical Quarter Consortium
        .with_metric(dollars(MED_BUDGET, "Medical Budget", 600_000))
        .with_metric(index(MED_INFLUENCE, "Medical Influence", 55))
        .with_metric(count(CLINIC_CAPACITY, "Clinic Capacity", 240))
        .with_metric(count(PATIENT_VOLUME, "Patient Volume", 190))
        .with_metric(index(HEALTH, "Health Outcome Index", 38))
        .with_metric(MetricConfig::new(BURNOUT, "Staff Burnout", 30).percent())
        // Shelters & Services Network
        .with_metric(dollars(SHELTER_BUDGET, "Shelters Budget", 500_000))
        .with_metric(index(SHELTER_INFLUENCE, "Shelters Influence", 50))
        .with_metric(count(BEDS, "Bed Capacity", 3_800))
        .with_metric(count(OCCUPANCY, "Occupancy Rate", 100).with_unit(Unit::Percent))
        .with_metric(count(VOLUNTEERS, "Volunteers", 280))
        .with_metric(
            MetricConfig::new(WAITLIST, "Shelter Waitlist", 420).bounded(Bounds::range(0, 5_000)),
        )
        .with_metric(MetricConfig::new(PLACEMENTS, "Housing Placements", 0).cumulative())
        // University Consortium
        .with_metric(dollars(UNI_BUDGET, "University Budget", 400_000))
        .with_metric(index(UNI_INFLUENCE, "University Influence", 45))
        .with_metric(dollars(RESEARCH_FUNDING, "Research Funding", 120_000))
        .with_metric(index(REPUTATION, "Reputation Score", 75))
        .with_metric(index(ENGAGEMENT, "Community Engagement", 40))
        .with_metric(MetricConfig::new(PUBLICATIONS, "Publications", 0).cumulative())
        // Tracking
        .with_metric(MetricConfig::new(DEATHS, "Homeless Deaths", 0).cumulative())
        .with_metric(MetricConfig::new(HUMAN_COST, "Human Cost Index", 0).cumulative())
        .with_metric(MetricConfig::new(SWEEPS, "Sweeps Conducted", 0).cumulative())
        .with_derived(HOMELESS_TOTAL, &[UNSHELTERED, SHELTERED, TRANSITIONAL])
        .with_history(HOMELESS_TOTAL, HISTORY_WINDOW)
        .with_flag(
            FlagConfig::new(LAST_POSITIVE, "Positive Action This Round", FlagKind::Round)
                .initially_set(),
        )
        .with_flag(FlagConfig::new(PILOT_LAUNCHED, "Pilot Launched", FlagKind::Latch))
        .with_list(ListConfig {
            id: RESEARCH_PROJECTS,
            name: "Research Projects".to_owned(),
        })
}

fn schedule() -> ScheduleConfig {
    ScheduleConfig::new()
        .with_seasons(ROUNDS_PER_SEASON, SEASONS)
        .with_periodic(PeriodicRule::new("support decay", Cadence::EveryStep, support_decay))
        .with_periodic(PeriodicRule::new("winter exposure", Cadence::EveryStep, winter_exposure))
        .with_periodic(PeriodicRule::new("summer heat", Cadence::EveryStep, summer_heat))
        .with_periodic(PeriodicRule::new("clinic overload", Cadence::EveryStep, clinic_overload))
        .with_periodic(PeriodicRule::new(
            "volunteer attrition",
            Cadence::EveryNSteps(ATTRITION_INTERVAL),
            volunteer_attrition,
        ))
}

fn support_decay(s: &State) -> Vec<Delta> {
    if s.flag(LAST_POSITIVE) {
        Vec::new()
    } else {
        vec![Delta::add(PUBLIC_SUPPORT, -1)]
    }
}

/// Deaths among the unsheltered (0.2%) and extra shelter demand.
fn winter_exposure(s: &State) -> Vec<Delta> {
    if s.season() != WINTER {
        return Vec::new();
    }
    let unsheltered = s.metric(UNSHELTERED);
    let mut deltas = Vec::new();
    if unsheltered > WINTER_EXPOSURE_THRESHOLD {
        let deaths = unsheltered * 2 / 1000;
        if deaths > 0 {
            deltas.push(Delta::add(DEATHS, deaths));
            deltas.push(Delta::note(format!(
                "Winter conditions: {deaths} homeless deaths reported."
            )));
        }
    }
    deltas.push(Delta::add(WAITLIST, unsheltered * 15 / 100 / 10));
    deltas
}

fn summer_heat(s: &State) -> Vec<Delta> {
    if s.season() == SUMMER && s.metric(HEALTH) < 45 {
        vec![Delta::add(HEALTH, -2)]
    } else {
        Vec::new()
    }
}

/// Clinics running above 90% of capacity burn out their staff.
fn clinic_overload(s: &State) -> Vec<Delta> {
    if s.metric(PATIENT_VOLUME) * 10 > s.metric(CLINIC_CAPACITY) * 9 {
        vec![Delta::add(BURNOUT, 8)]
    } else {
        Vec::new()
    }
}

fn volunteer_attrition(_: &State) -> Vec<Delta> {
    vec![Delta::scale(VOLUNTEERS, 95, 100)]
}

fn goals() -> GoalEvaluator {
    GoalEvaluator::new(vec![
        GoalRule::new("humanitarian crisis", humanitarian_crisis),
        GoalRule::new("political collapse", political_collapse),
        GoalRule::new("final scoring", final_scoring),
    ])
}

fn humanitarian_crisis(s: &State) -> Option<Outcome> {
    (s.metric(DEATHS) > 50).then(|| {
        Outcome::new(
            GameResult::NoWinner,
            "HUMANITARIAN CRISIS: More than 50 homeless deaths this season. Game over.\n\n\
             In real cities, winter weather and inadequate shelter capacity lead to preventable \
             deaths. This tragedy underscores the urgency of evidence-based housing interventions.",
        )
    })
}

fn political_collapse(s: &State) -> Option<Outcome> {
    (s.metric(PUBLIC_SUPPORT) < 25 && s.round() > 6).then(|| {
        Outcome::new(
            GameResult::NoWinner,
            "POLITICAL COLLAPSE: Public support has fallen below 25%. The coalition has lost \
             political viability. Game over.\n\n\
             Public trust is essential for sustainable policy. When communities lose faith in \
             interventions, funding disappears and programs fail.",
        )
    })
}

/// Scored once the last round is over, best tier first.
fn final_scoring(s: &State) -> Option<Outcome> {
    if s.round() <= FINAL_ROUND {
        return None;
    }

    let total = s.metric(HOMELESS_TOTAL);
    let support = s.metric(PUBLIC_SUPPORT);
    let reduction = (BASELINE_HOMELESS - total) as f64 / BASELINE_HOMELESS as f64 * 100.0;
    let everyone = || GameResult::Winners(STAKEHOLDERS.to_vec());

    let outcome = if total <= 8_560 && support > 55 {
        Outcome::new(
            everyone(),
            format!(
                "EXEMPLARY SUCCESS: Reduced homelessness by {reduction:.1}% (target: 20%) while \
                 maintaining strong public support.\n\n\
                 You achieved systemic change through evidence-based interventions and \
                 collaborative governance. Housing placements: {}. Trust Index: {}.",
                s.metric(PLACEMENTS),
                s.metric(TRUST)
            ),
        )
    } else if total <= 9_095 && support > 45 {
        Outcome::new(
            everyone(),
            format!(
                "SUCCESS: Reduced homelessness by {reduction:.1}% (target: 15%) with adequate \
                 public support.\n\n\
                 Meaningful progress achieved. Housing placements: {}.",
                s.metric(PLACEMENTS)
            ),
        )
    } else if total <= 9_630 {
        Outcome::new(
            GameResult::Draw,
            format!(
                "PARTIAL SUCCESS: Reduced homelessness by {reduction:.1}% (5-10% reduction).\n\n\
                 Some progress, but fell short of goals. Human Cost Index: {}.",
                s.metric(HUMAN_COST)
            ),
        )
    } else if total < BASELINE_HOMELESS {
        Outcome::new(
            GameResult::Draw,
            format!(
                "MINIMAL PROGRESS: Reduced homelessness by only {reduction:.1}%.\n\n\
                 The wicked problem resisted your interventions."
            ),
        )
    } else {
        Outcome::new(
            GameResult::NoWinner,
            format!(
                "FAILURE: Homelessness increased to {total} (from 10,700).\n\n\
                 Human Cost Index: {}.",
                s.metric(HUMAN_COST)
            ),
        )
    };
    Some(outcome)
}
