//! City Without Walls operator table.
//!
//! Every initiative pays a budget and an influence cost. Budgets are gated
//! by the preconditions; influence is not, so a stakeholder that has spent
//! its political capital runs into the shortfall branch instead.

use crate::core::{MetricId, State};
use crate::effects::{Delta, EffectBundle};
use crate::rules::{always, Catalog, OperatorDef};

use super::*;

/// Chance that the pilot intervention succeeds.
const PILOT_SUCCESS_CHANCE: f64 = 0.6;

/// People housed by one supportive housing site.
const SUPPORTIVE_HOUSING_UNITS: i64 = 50;

/// People housed by a successful pilot.
const PILOT_HOUSED: i64 = 40;

/// Research funding a policy study attracts.
const RESEARCH_GRANT: i64 = 40_000;

pub(super) fn catalog() -> Catalog {
    Catalog::new(vec![
        // Neighborhoods Coalition
        OperatorDef::new(MEDIA_CAMPAIGN, "Launch Media Campaign", NEIGHBORHOODS, can_media_campaign, media_campaign),
        OperatorDef::new(PRIVATE_SECURITY, "Fund Private Security Patrols", NEIGHBORHOODS, can_private_security, private_security),
        OperatorDef::new(NEIGHBORHOOD_OUTREACH, "Sponsor Neighborhood Outreach", NEIGHBORHOODS, can_neighborhood_outreach, neighborhood_outreach),
        OperatorDef::new(COMMUNITY_FORUMS, "Host Community Forums", NEIGHBORHOODS, can_community_forums, community_forums),
        // Business District Association
        OperatorDef::new(CITY_SWEEPS, "Partner with City Sanitation (Sweeps)", BUSINESS, can_city_sweeps, city_sweeps),
        OperatorDef::new(JOB_READINESS, "Fund Job Readiness Programs", BUSINESS, can_job_readiness, job_readiness),
        OperatorDef::new(STREET_AMBASSADORS, "Deploy Street Ambassadors", BUSINESS, can_street_ambassadors, street_ambassadors),
        OperatorDef::new(AFFORDABLE_HOUSING, "Support Affordable Housing Development", BUSINESS, can_affordable_housing, affordable_housing),
        // Medical Quarter Consortium
        OperatorDef::new(HEALTH_CLINIC, "Open Low-Barrier Health Clinic", MEDICAL, can_health_clinic, health_clinic),
        OperatorDef::new(MENTAL_HEALTH, "Launch Mental Health & Addiction Services", MEDICAL, can_mental_health, mental_health),
        OperatorDef::new(MEDICAL_RESPITE, "Establish Medical Respite Care", MEDICAL, can_medical_respite, medical_respite),
        OperatorDef::new(MOBILE_OUTREACH, "Mobile Outreach & Street Medicine", MEDICAL, can_mobile_outreach, mobile_outreach),
        // Shelters & Services Network
        OperatorDef::new(VOLUNTEER_DRIVE, "Launch Volunteer Recruitment Drive", SHELTERS, can_volunteer_drive, volunteer_drive),
        OperatorDef::new(EXPAND_SHELTER, "Expand Emergency Shelter Capacity", SHELTERS, can_expand_shelter, expand_shelter),
        OperatorDef::new(HOUSING_NAVIGATION, "Implement Housing Navigation Program", SHELTERS, can_housing_navigation, housing_navigation),
        OperatorDef::new(SUPPORTIVE_HOUSING, "Establish Permanent Supportive Housing (PSH)", SHELTERS, can_supportive_housing, supportive_housing),
        OperatorDef::new(RESEARCH_PARTNERSHIP, "Partner with University for Research", SHELTERS, can_research_partnership, research_partnership),
        // University Consortium
        OperatorDef::new(STUDENT_OUTREACH, "Launch Student Outreach & Service Learning", UNIVERSITY, can_student_outreach, student_outreach),
        OperatorDef::new(POLICY_RESEARCH, "Conduct Policy Research & Evaluation", UNIVERSITY, can_policy_research, policy_research),
        OperatorDef::new(PILOT_INTERVENTION, "Pilot Innovative Intervention", UNIVERSITY, can_pilot_intervention, pilot_intervention),
        OperatorDef::new(ACADEMIC_FORUMS, "Host Community-Academic Forums", UNIVERSITY, can_academic_forums, academic_forums),
        OperatorDef::new(DATA_DASHBOARD, "Develop Homelessness Data Dashboard", UNIVERSITY, can_data_dashboard, data_dashboard),
        // Holding moves
        OperatorDef::new(NEIGHBORHOODS_HOLD, "Hold Position", NEIGHBORHOODS, always, neighborhoods_hold),
        OperatorDef::new(BUSINESS_HOLD, "Hold Position", BUSINESS, always, business_hold),
        OperatorDef::new(MEDICAL_HOLD, "Hold Position", MEDICAL, always, medical_hold),
        OperatorDef::new(SHELTERS_HOLD, "Hold Position", SHELTERS, always, shelters_hold),
        OperatorDef::new(UNIVERSITY_HOLD, "Hold Position", UNIVERSITY, always, university_hold),
    ])
}

/// An initiative paid for from a stakeholder's budget and influence.
fn initiative(
    headline: &str,
    budget: MetricId,
    price: i64,
    influence: MetricId,
    capital: i64,
) -> EffectBundle {
    EffectBundle::new(headline)
        .cost(budget, price)
        .cost(influence, capital)
        .on_shortfall([
            Delta::note("The initiative stalls without political backing."),
            Delta::report(PUBLIC_SUPPORT, -1),
        ])
}

/// `value * per_mille / 1000`, truncated.
fn share(value: i64, per_mille: i64) -> i64 {
    value * per_mille / 1000
}

// === Preconditions ===

fn can_media_campaign(s: &State) -> bool {
    s.metric(NEIGH_BUDGET) >= 100_000 && s.metric(PUBLIC_SUPPORT) < 70
}

fn can_private_security(s: &State) -> bool {
    s.metric(NEIGH_BUDGET) >= 75_000 && s.metric(SAFETY) < 55
}

fn can_neighborhood_outreach(s: &State) -> bool {
    s.metric(NEIGH_BUDGET) >= 60_000 && s.metric(PUBLIC_SUPPORT) > 45
}

fn can_community_forums(s: &State) -> bool {
    s.metric(NEIGH_BUDGET) >= 15_000 && s.metric(COMPLAINTS) > 20
}

fn can_city_sweeps(s: &State) -> bool {
    s.metric(BIZ_BUDGET) >= 120_000 && s.metric(CLEANLINESS) < 60
}

fn can_job_readiness(s: &State) -> bool {
    s.metric(BIZ_BUDGET) >= 180_000 && s.round() > 3
}

fn can_street_ambassadors(s: &State) -> bool {
    s.metric(BIZ_BUDGET) >= 90_000 && s.metric(BIZ_REPUTATION) > 40
}

fn can_affordable_housing(s: &State) -> bool {
    s.metric(BIZ_BUDGET) >= 350_000 && s.round() > 8
}

fn can_health_clinic(s: &State) -> bool {
    s.metric(MED_BUDGET) >= 200_000 && s.round() > 2
}

fn can_mental_health(s: &State) -> bool {
    s.metric(MED_BUDGET) >= 280_000 && s.round() > 4
}

fn can_medical_respite(s: &State) -> bool {
    s.metric(MED_BUDGET) >= 160_000
}

fn can_mobile_outreach(s: &State) -> bool {
    s.metric(MED_BUDGET) >= 95_000 && s.round() > 2
}

fn can_volunteer_drive(s: &State) -> bool {
    s.metric(SHELTER_BUDGET) >= 50_000 && s.metric(PUBLIC_SUPPORT) > 45
}

fn can_expand_shelter(s: &State) -> bool {
    s.metric(SHELTER_BUDGET) >= 150_000
}

fn can_housing_navigation(s: &State) -> bool {
    s.metric(SHELTER_BUDGET) >= 120_000 && s.round() > 3
}

fn can_supportive_housing(s: &State) -> bool {
    s.metric(SHELTER_BUDGET) >= 400_000 && s.round() > 10 && s.metric(COORDINATION) > 50
}

fn can_research_partnership(s: &State) -> bool {
    s.metric(SHELTER_BUDGET) >= 75_000 && s.round() > 5
}

/// Students are away for the last two rounds of every twelve.
fn can_student_outreach(s: &State) -> bool {
    s.metric(UNI_BUDGET) >= 40_000 && !matches!(s.round() % 12, 0 | 11)
}

fn can_policy_research(s: &State) -> bool {
    s.metric(UNI_BUDGET) >= 90_000 && s.round() > 4
}

fn can_pilot_intervention(s: &State) -> bool {
    s.metric(UNI_BUDGET) >= 150_000
        && s.metric(RESEARCH_FUNDING) >= 150_000
        && s.round() > 6
        && !s.flag(PILOT_LAUNCHED)
}

fn can_academic_forums(s: &State) -> bool {
    s.metric(UNI_BUDGET) >= 25_000 && s.metric(ENGAGEMENT) < 60
}

fn can_data_dashboard(s: &State) -> bool {
    s.metric(UNI_BUDGET) >= 60_000 && s.round() > 8
}

// === Neighborhoods Coalition ===

fn media_campaign(s: &State) -> EffectBundle {
    let reduced = share(s.metric(UNSHELTERED), 10);
    initiative(
        "Neighborhoods Coalition launches 'Community Voices for Safe Streets' campaign.",
        NEIGH_BUDGET,
        100_000,
        NEIGH_INFLUENCE,
        10,
    )
    .report(PUBLIC_SUPPORT, 8)
    .add(STIGMA, 5)
    .note("Media campaign increases stigma through negative framing.")
    .add(UNSHELTERED, -reduced)
    .note(format!("Indirect reduction: {reduced} people (government response)."))
    .set_flag(LAST_POSITIVE)
}

fn private_security(s: &State) -> EffectBundle {
    let displaced = share(s.metric(UNSHELTERED), 150);
    initiative(
        "Neighborhoods Coalition funds private security patrols in residential zones.",
        NEIGH_BUDGET,
        75_000,
        NEIGH_INFLUENCE,
        15,
    )
    .report(SAFETY, 12)
    .add(UNSHELTERED, -displaced)
    .note(format!(
        "Visible homelessness reduced by {displaced} (displaced to other zones)."
    ))
    .report(TRUST, -10)
    .add(PUBLIC_SUPPORT, -5)
    .note("Public support decreased (concerns about militarization).")
    .add(PROPERTY_VALUE, 2)
    .add(HUMAN_COST, 8)
}

fn neighborhood_outreach(s: &State) -> EffectBundle {
    let connected = share(s.metric(UNSHELTERED), 120);
    initiative(
        "Neighborhoods Coalition sponsors 'Neighborhood Ambassadors' outreach program.",
        NEIGH_BUDGET,
        60_000,
        NEIGH_INFLUENCE,
        8,
    )
    .report(TRUST, 6)
    .with(Delta::scale(VOLUNTEERS, 109, 100))
    .note(format!(
        "Volunteer count increased to {}.",
        s.metric(VOLUNTEERS) * 109 / 100
    ))
    .with(Delta::transfer(UNSHELTERED, SHELTERED, connected))
    .note(format!("{connected} people connected to services."))
    .add(PUBLIC_SUPPORT, 3)
    .add(PROPERTY_VALUE, 1)
    .add(COORDINATION, 5)
    .set_flag(LAST_POSITIVE)
}

fn community_forums(_: &State) -> EffectBundle {
    initiative(
        "Neighborhoods Coalition hosts community forums for dialogue.",
        NEIGH_BUDGET,
        15_000,
        NEIGH_INFLUENCE,
        5,
    )
    .report(COMPLAINTS, -8)
    .add(PUBLIC_SUPPORT, 2)
    .add(COORDINATION, 3)
    .add(STIGMA, -3)
    .note("Community understanding improved through dialogue.")
    .set_flag(LAST_POSITIVE)
}

// === Business District Association ===

fn city_sweeps(s: &State) -> EffectBundle {
    let displaced = share(s.metric(UNSHELTERED), 200);
    initiative(
        "Business District Association partners with city sanitation for encampment sweeps.",
        BIZ_BUDGET,
        120_000,
        BIZ_INFLUENCE,
        12,
    )
    .report(CLEANLINESS, 18)
    .add(TRAFFIC, 6)
    .note(format!(
        "{displaced} people displaced from downtown (temporary effect)."
    ))
    .report(TRUST, -15)
    .add(PUBLIC_SUPPORT, -8)
    .note("Public backlash from belongings destruction.")
    .add(SWEEPS, 1)
    .add(HUMAN_COST, 15)
    .note("Reality check: Encampment sweeps disperse people without reducing homelessness.")
}

fn job_readiness(s: &State) -> EffectBundle {
    let employed = share(s.metric(HOMELESS_TOTAL), 25);
    let at_risk = s.metric(AT_RISK) * 97 / 100;
    initiative(
        "Business District Association funds 'Pathways to Work' job readiness program.",
        BIZ_BUDGET,
        180_000,
        BIZ_INFLUENCE,
        8,
    )
    .report(PUBLIC_SUPPORT, 6)
    .add(BIZ_REPUTATION, 8)
    .add(TRANSITIONAL, -(employed / 2))
    .add(SHELTERED, -(employed / 2))
    .note(format!("{employed} people gained employment, exited homelessness."))
    .set(AT_RISK, at_risk)
    .note(format!("At-risk population reduced to {at_risk}."))
    .set_flag(LAST_POSITIVE)
}

fn street_ambassadors(s: &State) -> EffectBundle {
    let connected = share(s.metric(UNSHELTERED), 180);
    let to_shelter = connected.min(s.metric(WAITLIST));
    initiative(
        "Business District Association deploys volunteer street ambassadors.",
        BIZ_BUDGET,
        90_000,
        BIZ_INFLUENCE,
        6,
    )
    .report(VOLUNTEERS, 40)
    .report(TRUST, 8)
    .with(Delta::transfer(UNSHELTERED, SHELTERED, to_shelter))
    .with(Delta::transfer(UNSHELTERED, TRANSITIONAL, connected - to_shelter))
    .add(WAITLIST, -(connected / 2))
    .note(format!("{connected} people connected to services."))
    .add(BIZ_REPUTATION, 6)
    .add(CLEANLINESS, 8)
    .add(COORDINATION, 4)
    .set_flag(LAST_POSITIVE)
}

fn affordable_housing(s: &State) -> EffectBundle {
    let at_risk = s.metric(AT_RISK) * 94 / 100;
    initiative(
        "Business District Association supports mixed-income affordable housing development.",
        BIZ_BUDGET,
        350_000,
        BIZ_INFLUENCE,
        25,
    )
    .report(PUBLIC_SUPPORT, 12)
    .report(BIZ_REPUTATION, 15)
    .note("85 affordable housing units under construction.")
    .set(AT_RISK, at_risk)
    .note(format!("At-risk population reduced to {at_risk}."))
    .set_flag(LAST_POSITIVE)
}

// === Medical Quarter Consortium ===

fn health_clinic(s: &State) -> EffectBundle {
    let capacity = s.metric(CLINIC_CAPACITY) + 120;
    let housed = share(s.metric(HOMELESS_TOTAL), 30);
    initiative(
        "Medical Quarter Consortium opens low-barrier health clinic.",
        MED_BUDGET,
        200_000,
        MED_INFLUENCE,
        10,
    )
    .report(CLINIC_CAPACITY, 120)
    .report(HEALTH, 12)
    .set(PATIENT_VOLUME, capacity.min(s.metric(PATIENT_VOLUME) + 80))
    .add(SHELTERED, -(housed / 2))
    .add(UNSHELTERED, -(housed / 2))
    .note(format!(
        "{housed} people achieved housing stability through health improvements."
    ))
    .add(PUBLIC_SUPPORT, 5)
    .add(BURNOUT, -5)
    .with(Delta::scale(AT_RISK, 98, 100))
    .note("Evidence: Low-barrier clinics improve health outcomes and enable housing stability.")
    .set_flag(LAST_POSITIVE)
}

fn mental_health(s: &State) -> EffectBundle {
    let housed = share(s.metric(HOMELESS_TOTAL), 40);
    initiative(
        "Medical Quarter Consortium launches integrated mental health & addiction services.",
        MED_BUDGET,
        280_000,
        MED_INFLUENCE,
        15,
    )
    .report(HEALTH, 18)
    .set(
        PATIENT_VOLUME,
        s.metric(CLINIC_CAPACITY).min(s.metric(PATIENT_VOLUME) + 100),
    )
    .add(TRANSITIONAL, -(housed / 2))
    .add(SHELTERED, -(housed / 2))
    .note(format!(
        "{housed} people successfully housed through mental health support."
    ))
    .add(PUBLIC_SUPPORT, 7)
    .add(COORDINATION, 6)
    .note(
        "Evidence: Mental health services increase housing retention by 35% when paired \
         with stable housing.",
    )
    .set_flag(LAST_POSITIVE)
}

fn medical_respite(s: &State) -> EffectBundle {
    let housed = share(s.metric(HOMELESS_TOTAL), 20).min(s.metric(SHELTERED));
    initiative(
        "Medical Quarter Consortium establishes medical respite care facility.",
        MED_BUDGET,
        160_000,
        MED_INFLUENCE,
        15,
    )
    .report(BEDS, 45)
    .report(HEALTH, 10)
    .add(SHELTERED, -housed)
    .note(format!(
        "{housed} people transitioned to housing through medical respite."
    ))
    .add(PUBLIC_SUPPORT, 4)
    .add(COORDINATION, 5)
    .note(
        "Evidence: Medical respite reduces hospital readmissions by 32% and offers \
         pathway to housing.",
    )
    .set_flag(LAST_POSITIVE)
}

fn mobile_outreach(s: &State) -> EffectBundle {
    let treated = share(s.metric(UNSHELTERED), 150);
    let connected = share(s.metric(UNSHELTERED), 80);
    initiative(
        "Medical Quarter Consortium launches mobile outreach and street medicine program.",
        MED_BUDGET,
        95_000,
        MED_INFLUENCE,
        8,
    )
    .report(TRUST, 12)
    .add(HEALTH, 6)
    .note(format!("{treated} unsheltered individuals received healthcare."))
    .with(Delta::transfer(UNSHELTERED, SHELTERED, connected))
    .note(format!("{connected} people connected to shelter services."))
    .add(PUBLIC_SUPPORT, 3)
    .set_flag(LAST_POSITIVE)
}

// === Shelters & Services Network ===

fn volunteer_drive(s: &State) -> EffectBundle {
    let helped = share(s.metric(HOMELESS_TOTAL), 20);
    initiative(
        "Shelters & Services Network launches 'Be the Change' volunteer recruitment drive.",
        SHELTER_BUDGET,
        50_000,
        SHELTER_INFLUENCE,
        5,
    )
    .with(Delta::scale(VOLUNTEERS, 110, 100))
    .note(format!(
        "Volunteer count increased to {}.",
        s.metric(VOLUNTEERS) * 110 / 100
    ))
    .add(UNSHELTERED, -helped)
    .note(format!("{helped} people helped through expanded volunteer services."))
    .report(PUBLIC_SUPPORT, 5)
    .add(ENGAGEMENT, 4)
    .add(BURNOUT, -3)
    .set_flag(LAST_POSITIVE)
}

fn expand_shelter(s: &State) -> EffectBundle {
    let moved = 180.min(s.metric(UNSHELTERED)).min(s.metric(WAITLIST));
    initiative(
        "Shelters & Services Network expands emergency shelter capacity.",
        SHELTER_BUDGET,
        150_000,
        SHELTER_INFLUENCE,
        10,
    )
    .report(BEDS, 180)
    .with(Delta::transfer(UNSHELTERED, SHELTERED, moved))
    .add(WAITLIST, -90)
    .note(format!("{moved} people moved from streets to shelter."))
    .add(PUBLIC_SUPPORT, -3)
    .note("Public support slightly decreased (concerns about enabling).")
    .note(
        "Reality: Expanding shelter capacity reduces unsheltered temporarily but doesn't \
         solve underlying housing crisis.",
    )
    .set_flag(LAST_POSITIVE)
}

fn housing_navigation(s: &State) -> EffectBundle {
    let placed = share(s.metric(SHELTERED), 250);
    initiative(
        "Shelters & Services Network implements comprehensive housing navigation program.",
        SHELTER_BUDGET,
        120_000,
        SHELTER_INFLUENCE,
        10,
    )
    .add(SHELTERED, -placed)
    .add(PLACEMENTS, placed)
    .note(format!("{placed} people successfully placed in permanent housing."))
    .report(WAITLIST, -60)
    .add(PUBLIC_SUPPORT, 6)
    .note("Public support increased (solution-focused approach).")
    .add(COORDINATION, 8)
    .note(
        "Evidence: Housing navigation reduces shelter stay length by 30% and improves retention.",
    )
    .set_flag(LAST_POSITIVE)
}

fn supportive_housing(s: &State) -> EffectBundle {
    let from_shelters = (SUPPORTIVE_HOUSING_UNITS / 2).min(s.metric(SHELTERED));
    let from_streets = (SUPPORTIVE_HOUSING_UNITS / 2).min(s.metric(UNSHELTERED));
    let housed = from_shelters + from_streets;
    initiative(
        "Shelters & Services Network establishes Permanent Supportive Housing (Housing First model).",
        SHELTER_BUDGET,
        400_000,
        SHELTER_INFLUENCE,
        30,
    )
    .add(SHELTERED, -from_shelters)
    .add(UNSHELTERED, -from_streets)
    .add(PLACEMENTS, housed)
    .note(format!(
        "{housed} chronically homeless individuals housed with wraparound services."
    ))
    .report(PUBLIC_SUPPORT, 10)
    .add(HEALTH, 8)
    .add(COORDINATION, 10)
    .note(
        "Evidence: Housing First achieves 85-90% retention rates and reduces emergency \
         services use by 40%.",
    )
    .set_flag(LAST_POSITIVE)
}

fn research_partnership(s: &State) -> EffectBundle {
    initiative(
        "Shelters & Services Network partners with university for research evaluation.",
        SHELTER_BUDGET,
        75_000,
        SHELTER_INFLUENCE,
        8,
    )
    .add(PUBLICATIONS, 1)
    .note(format!(
        "Research publication count: {}.",
        s.metric(PUBLICATIONS) + 1
    ))
    .add(PUBLIC_SUPPORT, 4)
    .note("Public support increased (transparency and accountability).")
    .add(COORDINATION, 6)
    .add(UNI_INFLUENCE, 5)
    .add(REPUTATION, 6)
    .note("Research identifies most effective interventions for future use.")
    .set_flag(LAST_POSITIVE)
}

// === University Consortium ===

fn student_outreach(s: &State) -> EffectBundle {
    let connected = share(s.metric(UNSHELTERED), 100);
    initiative(
        "University Consortium launches student outreach and service learning program.",
        UNI_BUDGET,
        40_000,
        UNI_INFLUENCE,
        5,
    )
    .report(VOLUNTEERS, 60)
    .report(ENGAGEMENT, 12)
    .with(Delta::transfer(UNSHELTERED, SHELTERED, connected))
    .note(format!(
        "{connected} people connected to services through student outreach."
    ))
    .add(PUBLIC_SUPPORT, 3)
    .note("Students gain empathy and understanding of systemic issues.")
    .set_flag(LAST_POSITIVE)
}

/// Each study also attracts a [`RESEARCH_GRANT`]. This grant is the only
/// income for research funding, and the pilot intervention spends it.
fn policy_research(s: &State) -> EffectBundle {
    initiative(
        "University Consortium conducts comprehensive policy research and evaluation.",
        UNI_BUDGET,
        90_000,
        UNI_INFLUENCE,
        10,
    )
    .add(PUBLICATIONS, 1)
    .with(Delta::append(
        RESEARCH_PROJECTS,
        format!("Round {} Research", s.round()),
    ))
    .note(format!(
        "Research publication #{} completed.",
        s.metric(PUBLICATIONS) + 1
    ))
    .report(COORDINATION, 8)
    .add(NEIGH_INFLUENCE, 5)
    .add(BIZ_INFLUENCE, 5)
    .add(MED_INFLUENCE, 5)
    .add(SHELTER_INFLUENCE, 5)
    .note("All stakeholders gain influence from evidence-based insights.")
    .add(REPUTATION, 8)
    .add(PUBLIC_SUPPORT, 2)
    .add(RESEARCH_FUNDING, RESEARCH_GRANT)
    .note(
        "Research reveals: Housing First reduces costs, sweeps don't reduce homelessness, \
         coordination is critical.",
    )
    .set_flag(LAST_POSITIVE)
}

fn pilot_intervention(_: &State) -> EffectBundle {
    initiative(
        "University Consortium launches pilot innovative intervention (tiny homes/guaranteed income).",
        UNI_BUDGET,
        150_000,
        UNI_INFLUENCE,
        20,
    )
    .cost(RESEARCH_FUNDING, 150_000)
    .set_flag(PILOT_LAUNCHED)
    .add(ENGAGEMENT, 8)
    .set_flag(LAST_POSITIVE)
    .gamble(
        PILOT_SUCCESS_CHANCE,
        [
            Delta::note("PILOT SUCCESS: Innovative approach shows promising results!"),
            Delta::add(UNSHELTERED, -PILOT_HOUSED),
            Delta::note(format!(
                "{PILOT_HOUSED} people successfully housed through pilot program."
            )),
            Delta::add(REPUTATION, 12),
            Delta::add(PUBLIC_SUPPORT, 5),
            Delta::add(PUBLICATIONS, 1),
            Delta::note("Research published on successful pilot intervention."),
        ],
        [
            Delta::note("Pilot encounters challenges but provides learning opportunity."),
            Delta::add(REPUTATION, -5),
            Delta::note("Some reputational impact from publicized challenges."),
        ],
    )
}

fn academic_forums(_: &State) -> EffectBundle {
    initiative(
        "University Consortium hosts community-academic partnership forums.",
        UNI_BUDGET,
        25_000,
        UNI_INFLUENCE,
        8,
    )
    .report(ENGAGEMENT, 15)
    .add(COORDINATION, 6)
    .add(PUBLIC_SUPPORT, 3)
    .report(STIGMA, -5)
    .note("Forums create space for mutual learning between academics and community.")
    .set_flag(LAST_POSITIVE)
}

fn data_dashboard(_: &State) -> EffectBundle {
    initiative(
        "University Consortium develops comprehensive homelessness data dashboard.",
        UNI_BUDGET,
        60_000,
        UNI_INFLUENCE,
        6,
    )
    .report(COORDINATION, 10)
    .add(PUBLIC_SUPPORT, 6)
    .note("Public support increased (transparency and accountability).")
    .add(REPUTATION, 10)
    .note("Dashboard enables coordinated strategy across all stakeholders.")
    .set_flag(LAST_POSITIVE)
}

// === Holding moves ===

fn neighborhoods_hold(_: &State) -> EffectBundle {
    EffectBundle::new("Neighborhoods Coalition holds position.")
}

fn business_hold(_: &State) -> EffectBundle {
    EffectBundle::new("Business District Association holds position.")
}

fn medical_hold(_: &State) -> EffectBundle {
    EffectBundle::new("Medical Quarter Consortium holds position.")
}

fn shelters_hold(_: &State) -> EffectBundle {
    EffectBundle::new("Shelters & Services Network holds position.")
}

fn university_hold(_: &State) -> EffectBundle {
    EffectBundle::new("University Consortium holds position.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_truncates() {
        assert_eq!(share(4500, 12), 54);
        assert_eq!(share(10_700, 25), 267);
        assert_eq!(share(99, 10), 0);
    }

    #[test]
    fn test_every_stakeholder_can_hold() {
        let catalog = catalog();
        for role in STAKEHOLDERS {
            assert!(
                catalog
                    .for_role(role)
                    .any(|def| def.name == "Hold Position"),
                "{role} has no holding move"
            );
        }
        assert_eq!(catalog.for_role(OBSERVER).count(), 0);
    }

    #[test]
    fn test_student_outreach_calendar() {
        let config = super::super::game::config();
        let base = State::new(&config);

        assert!(can_student_outreach(&base.clone().with_round(10)));
        assert!(!can_student_outreach(&base.clone().with_round(11)));
        assert!(!can_student_outreach(&base.clone().with_round(12)));
        assert!(can_student_outreach(&base.with_round(13)));
    }

    #[test]
    fn test_pilot_requires_research_funding() {
        let config = super::super::game::config();
        let base = State::new(&config).with_round(7);

        assert!(can_pilot_intervention(&base.clone().with_metric(RESEARCH_FUNDING, 150_000)));
        assert!(!can_pilot_intervention(&base.clone().with_metric(RESEARCH_FUNDING, 149_999)));
        assert!(!can_pilot_intervention(
            &base
                .with_metric(RESEARCH_FUNDING, 200_000)
                .with_flag(PILOT_LAUNCHED, true)
        ));
    }
}
