use super::common::*;
use crate::results::citizenship::CalculatedFilter;
use crate::results::domain::LegalStatus;
use crate::results::visibility::{
    filter_visible, is_basically_visible, program_value, ResultsSummary,
};

#[test]
fn program_value_skips_members_who_already_receive_it() {
    let mut program = member_program(
        1,
        requirements([LegalStatus::Citizen]),
        &["a", "b", "c"],
        25.0,
    );
    program.household_value = 10.0;
    program.members[1].already_has = true;

    assert_eq!(program_value(&program), 60.0);
}

#[test]
fn basic_visibility_requires_every_condition() {
    let household = vec![member("adult", 40)];
    let filter_state = state(LegalStatus::Citizen, &household);

    let visible = citizen_program(1);
    assert!(is_basically_visible(&visible, &filter_state));

    let mut ineligible = citizen_program(2);
    ineligible.eligible = false;
    assert!(!is_basically_visible(&ineligible, &filter_state));

    let mut worthless = citizen_program(3);
    worthless.household_value = 0.0;
    assert!(!is_basically_visible(&worthless, &filter_state));

    let mut held = citizen_program(4);
    held.already_has = true;
    assert!(!is_basically_visible(&held, &filter_state));

    let other_status = program(5, requirements([LegalStatus::Refugee]));
    assert!(!is_basically_visible(&other_status, &filter_state));
}

#[test]
fn active_calculated_labels_satisfy_the_status_check() {
    let program = program(8, requirements([CalculatedFilter::OtherHealthCareUnder19]));

    let with_child = state(LegalStatus::NonCitizen, &[member("kid", 8)]);
    let adults_only = state(LegalStatus::NonCitizen, &[member("adult", 38)]);

    assert!(is_basically_visible(&program, &with_child));
    assert!(!is_basically_visible(&program, &adults_only));
}

#[test]
fn unknown_requirements_never_match() {
    let mut program = citizen_program(9);
    program.legal_status_required =
        serde_json::from_str(r#"["tribal_member"]"#).expect("requirements parse");
    let filter_state = state(LegalStatus::Citizen, &[member("adult", 30)]);

    assert!(!is_basically_visible(&program, &filter_state));
}

#[test]
fn filter_keeps_input_order_and_admin_keeps_everything() {
    let household = vec![member("adult", 40)];
    let filter_state = state(LegalStatus::Citizen, &household);
    let mut hidden = citizen_program(2);
    hidden.eligible = false;
    let programs = vec![citizen_program(3), hidden, citizen_program(1)];

    assert_eq!(ids(&filter_visible(&programs, &filter_state, false)), vec![3, 1]);
    assert_eq!(filter_visible(&programs, &filter_state, true), programs);
}

#[test]
fn summary_totals_visible_program_value() {
    let programs = vec![
        citizen_program(1),
        member_program(2, requirements([LegalStatus::Citizen]), &["a", "b"], 12.5),
    ];

    let summary = ResultsSummary::from_programs(&programs);

    assert_eq!(summary.program_count, 2);
    assert_eq!(summary.total_value, 125.0);
}
