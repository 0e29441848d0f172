//! Coverage Clash operator table.

use crate::core::State;
use crate::effects::{Delta, EffectBundle};
use crate::rules::{always, Catalog, OperatorDef};

use super::*;

/// Chance that a funding request is intercepted.
const INTERCEPT_CHANCE: f64 = 0.3;

pub(super) fn catalog() -> Catalog {
    Catalog::new(vec![
        OperatorDef::new(EXPAND_PUBLIC_COVERAGE, "Expand Public Coverage", POLICY_MAKER, can_expand_coverage, expand_public_coverage),
        OperatorDef::new(SUBSIDIZE_COVERAGE, "Subsidize Coverage", POLICY_MAKER, can_subsidize, subsidize_coverage),
        OperatorDef::new(REQUEST_FUNDS, "Request Funds", POLICY_MAKER, always, request_funds),
        OperatorDef::new(CAP_PREMIUMS, "Cap Premiums", POLICY_MAKER, can_cap_premiums, cap_premiums),
        OperatorDef::new(MANDATE_COVERAGE, "Mandate Coverage", POLICY_MAKER, can_mandate_coverage, mandate_coverage),
        OperatorDef::new(INVEST_IN_CLINICS, "Invest in Clinics", POLICY_MAKER, can_invest_clinics, invest_in_clinics),
        OperatorDef::new(POLICY_MAKER_PASS, "Pass", POLICY_MAKER, always, policy_maker_pass),
        OperatorDef::new(RAISE_PREMIUMS, "Raise Premiums", INSURER, can_raise_premiums, raise_premiums),
        OperatorDef::new(RISK_SELECTION, "Risk Selection", INSURER, always, risk_selection),
        OperatorDef::new(NARROW_NETWORK, "Narrow Provider Network", INSURER, always, narrow_provider_network),
        OperatorDef::new(LOBBY_GOVERNMENT, "Lobby Government", INSURER, can_lobby, lobby_government),
        OperatorDef::new(MISINFORMATION, "Misinformation Campaigns", INSURER, can_misinform, misinformation_campaigns),
        OperatorDef::new(BRIBE_PREVENT_EXPANSION, "Prevent Expansion (Bribe)", INSURER, bribe_available, prevent_expansion),
        OperatorDef::new(BRIBE_FUND_MISINFORMATION, "Fund Misinformation (Bribe)", INSURER, bribe_available, fund_misinformation),
        OperatorDef::new(INSURER_PASS, "Pass", INSURER, always, insurer_pass),
    ])
}

// === Preconditions ===

fn can_expand_coverage(s: &State) -> bool {
    s.metric(BUDGET) >= 20 && s.metric(EXPANSION_CAP_TURNS) <= 0
}

fn can_subsidize(s: &State) -> bool {
    s.metric(BUDGET) >= 14
}

fn can_cap_premiums(s: &State) -> bool {
    s.metric(BUDGET) >= 14
}

fn can_mandate_coverage(s: &State) -> bool {
    s.metric(BUDGET) >= 10
}

fn can_invest_clinics(s: &State) -> bool {
    s.metric(BUDGET) >= 18
}

fn can_raise_premiums(s: &State) -> bool {
    s.metric(PREMIUM_CAP_TURNS) <= 0
}

fn can_lobby(s: &State) -> bool {
    s.metric(INFLUENCE) >= 75 && s.metric(TURNS_SINCE_LOBBY) >= 3
}

fn can_misinform(s: &State) -> bool {
    s.metric(PROFIT) >= 3
}

fn bribe_available(s: &State) -> bool {
    s.flag(BRIBE_MENU)
}

// === Policy Maker ===

fn expand_public_coverage(_: &State) -> EffectBundle {
    EffectBundle::new("Policy Maker expands public coverage.")
        .cost(BUDGET, 17)
        .report(ACCESS_GAP, -6)
        .report(TRUST, 3)
        .report(UNINSURED, -5)
        .report(PROFIT, -5)
        .report(HEALTH, 5)
}

fn subsidize_coverage(_: &State) -> EffectBundle {
    EffectBundle::new("Policy Maker subsidizes coverage.")
        .cost(BUDGET, 11)
        .report(ACCESS_GAP, -3)
        .report(TRUST, 2)
        .report(UNINSURED, -3)
        .report(PROFIT, -3)
        .report(HEALTH, 4)
}

fn request_funds(s: &State) -> EffectBundle {
    let intercepted = if s.metric(FUNDS_INTERCEPTED) == 0 {
        "Funds are intercepted! The Insurance Company can now choose to act. \
         Did you know? Corruption can cause funds to be used in damaging ways."
    } else {
        "Funds are intercepted! The Insurance Company can now choose to act."
    };

    // The public health aside follows the funding result, on the first request only.
    let aside = (s.metric(FUNDS_REQUESTED) == 0).then(|| {
        Delta::note(
            "Did you know? Public health in the USA is also suffering for lack of funding. \
             The rising rate of chronic disease is attributed in part to underinvestment \
             in public health infrastructure.",
        )
    });

    EffectBundle::new("Policy Maker requests funds from the government.")
        .add(FUNDS_REQUESTED, 1)
        .gamble(
            INTERCEPT_CHANCE,
            [
                Delta::add(FUNDS_INTERCEPTED, 1),
                Delta::note(intercepted),
                Delta::SetFlag(BRIBE_MENU),
            ]
            .into_iter()
            .chain(aside.clone()),
            [Delta::note("Request succeeds!"), Delta::report(BUDGET, 25)]
                .into_iter()
                .chain(aside),
        )
}

fn cap_premiums(_: &State) -> EffectBundle {
    EffectBundle::new("Policy Maker caps insurance premiums.")
        .cost(BUDGET, 11)
        .report(ACCESS_GAP, -2)
        .report(TRUST, 5)
        .report(INFLUENCE, -8)
        .report(UNINSURED, -2)
        .set(PREMIUM_CAP_TURNS, 3)
        .note("Premium increases are blocked for 3 turns.")
}

fn mandate_coverage(_: &State) -> EffectBundle {
    EffectBundle::new("Policy Maker mandates coverage.")
        .cost(BUDGET, 7)
        .report(ACCESS_GAP, -4)
        .report(TRUST, -2)
        .report(UNINSURED, -10)
        .report(HEALTH, 3)
}

fn invest_in_clinics(_: &State) -> EffectBundle {
    EffectBundle::new("Policy Maker invests in public clinics.")
        .cost(BUDGET, 15)
        .report(ACCESS_GAP, -3)
        .report(HEALTH, 6)
        .report(UNINSURED, -4)
        .report(TRUST, 4)
}

fn policy_maker_pass(s: &State) -> EffectBundle {
    let gap_drift = if s.metric(INFLUENCE) >= 80 {
        2
    } else if s.metric(ACCESS_GAP) >= 30 {
        1
    } else {
        0
    };

    let bundle = EffectBundle::new("Policy Maker passes.").report(TRUST, -5);
    if gap_drift > 0 {
        bundle.report(ACCESS_GAP, gap_drift)
    } else {
        bundle
    }
}

// === Insurance Company ===

fn raise_premiums(_: &State) -> EffectBundle {
    EffectBundle::new("Insurance Company raises premiums.")
        .report(PROFIT, 6)
        .report(ACCESS_GAP, 3)
        .report(UNINSURED, 8)
        .report(HEALTH, -2)
        .report(INFLUENCE, -2)
        .add(TURNS_SINCE_LOBBY, 1)
}

fn risk_selection(_: &State) -> EffectBundle {
    EffectBundle::new("Insurance Company engages in risk selection.")
        .report(ACCESS_GAP, 6)
        .report(INFLUENCE, -4)
        .report(UNINSURED, 6)
        .report(PROFIT, 5)
        .report(HEALTH, -4)
        .add(TURNS_SINCE_LOBBY, 1)
}

fn narrow_provider_network(_: &State) -> EffectBundle {
    EffectBundle::new("Insurance Company narrows its provider network.")
        .report(ACCESS_GAP, 5)
        .report(INFLUENCE, -3)
        .report(UNINSURED, 8)
        .report(PROFIT, 3)
        .report(HEALTH, -4)
        .add(TURNS_SINCE_LOBBY, 1)
}

fn lobby_government(_: &State) -> EffectBundle {
    EffectBundle::new("Insurance Company lobbies government, costing the Policy Maker a turn.")
        .report(ACCESS_GAP, 3)
        .report(UNINSURED, 6)
        .report(HEALTH, -4)
        .report(TRUST, -5)
        .report(INFLUENCE, 5)
        .set_flag(SKIP_NEXT_TURN)
        .set(TURNS_SINCE_LOBBY, 0)
}

fn misinformation_campaigns(_: &State) -> EffectBundle {
    EffectBundle::new("Insurance Company launches misinformation campaigns.")
        .cost(PROFIT, 3)
        .report(ACCESS_GAP, 3)
        .report(INFLUENCE, 8)
        .report(UNINSURED, 3)
        .report(TRUST, -3)
        .add(TURNS_SINCE_LOBBY, 1)
}

fn prevent_expansion(_: &State) -> EffectBundle {
    EffectBundle::new(
        "Insurance Company uses intercepted funds to block public coverage expansion.",
    )
    .set(EXPANSION_CAP_TURNS, 2)
    .report(PROFIT, 10)
    .report(INFLUENCE, 8)
    .clear_flag(BRIBE_MENU)
    .set_flag(SKIP_NEXT_TURN)
}

fn fund_misinformation(_: &State) -> EffectBundle {
    EffectBundle::new("Insurance Company uses intercepted funds to launch a misinformation campaign.")
        .report(TRUST, -9)
        .report(PROFIT, 10)
        .report(INFLUENCE, 8)
        .clear_flag(BRIBE_MENU)
        .set_flag(SKIP_NEXT_TURN)
}

fn insurer_pass(s: &State) -> EffectBundle {
    let bundle = EffectBundle::new("Insurance Company passes.").report(INFLUENCE, -5);
    if s.metric(INFLUENCE) - 5 <= 65 {
        bundle.report(PROFIT, -2)
    } else {
        bundle
    }
}
