use std::collections::BTreeSet;

use super::common::*;
use crate::results::citizenship::{calculate_derived_filters, CalculatedFilter};
use crate::results::domain::{HouseholdMember, LegalStatus, MemberId, StatusRequirement};

#[test]
fn citizen_selection_activates_no_calculated_filters() {
    let household = vec![member("adult", 34), pregnant_member("parent", 29), member("kid", 6)];

    let active = calculate_derived_filters(LegalStatus::Citizen, &household, as_of());

    assert!(active.is_empty());
}

#[test]
fn non_citizen_child_activates_under_19_health_care() {
    let household = vec![member("kid", 15)];

    let active = calculate_derived_filters(LegalStatus::NonCitizen, &household, as_of());

    assert!(active.contains(&CalculatedFilter::OtherHealthCareUnder19));
    assert!(active.contains(&CalculatedFilter::NotPregnantForMassHealthLimited));
    assert!(!active.contains(&CalculatedFilter::OtherHealthCarePregnant));
    assert!(!active.contains(&CalculatedFilter::NotPregnantOrChildForMassHealthLimited));
}

#[test]
fn non_citizen_adult_activates_adult_only_labels() {
    let household = vec![member("adult", 25)];

    let active = calculate_derived_filters(LegalStatus::NonCitizen, &household, as_of());

    let expected: BTreeSet<_> = [
        CalculatedFilter::NotPregnantOrUnder19ForOmniSalud,
        CalculatedFilter::NotPregnantOrUnder19ForEmergencyMedicaid,
        CalculatedFilter::NotPregnantForMassHealthLimited,
        CalculatedFilter::NotPregnantOrChildForMassHealthLimited,
    ]
    .into_iter()
    .collect();
    assert_eq!(active, expected);
}

#[test]
fn recent_green_card_household_activates_age_bands() {
    let household = vec![member("adult", 30), member("teen", 17)];

    let active = calculate_derived_filters(LegalStatus::GreenCardUnderFive, &household, as_of());

    assert!(active.contains(&CalculatedFilter::GreenCard18PlusUnderFive));
    assert!(active.contains(&CalculatedFilter::GreenCardUnder18UnderFive));
    assert!(active.contains(&CalculatedFilter::GreenCardUnder19OrPregnantUnderFive));
    assert!(active
        .iter()
        .all(|filter| filter.is_linked_to(LegalStatus::GreenCardUnderFive)));
}

#[test]
fn filter_state_is_recomputed_per_selection() {
    let household = vec![member("adult", 30), member("kid", 4)];

    let non_citizen = state(LegalStatus::NonCitizen, &household);
    let green_card = state(LegalStatus::GreenCardUnderFive, &household);

    assert_eq!(non_citizen.selected_citizenship, LegalStatus::NonCitizen);
    assert!(non_citizen.is_active(CalculatedFilter::OtherHealthCareUnder19));
    assert!(!non_citizen.is_active(CalculatedFilter::GreenCardUnder18UnderFive));
    assert!(green_card.is_active(CalculatedFilter::GreenCardUnder18UnderFive));
    assert!(!green_card.is_active(CalculatedFilter::OtherHealthCareUnder19));
    assert_eq!(green_card.as_of, as_of());
}

#[test]
fn every_calculated_filter_is_linked_to_a_primary_status() {
    for filter in CalculatedFilter::ALL {
        assert!(
            !filter.linked_filters().is_empty(),
            "{filter} has no linked statuses"
        );
    }
}

#[test]
fn members_without_birth_data_fail_every_age_check() {
    let unknown = HouseholdMember {
        frontend_id: MemberId("unknown".to_string()),
        birth_year: None,
        birth_month: None,
        relationship: Some("other".to_string()),
        conditions: Default::default(),
    };

    assert!(!CalculatedFilter::OtherHealthCareUnder19.matches(&unknown, as_of()));
    assert!(!CalculatedFilter::GreenCard18PlusUnderFive.matches(&unknown, as_of()));
    assert!(!CalculatedFilter::NotPregnantOrChildForMassHealthLimited.matches(&unknown, as_of()));
    assert!(CalculatedFilter::NotPregnantForMassHealthLimited.matches(&unknown, as_of()));
}

#[test]
fn pregnancy_satisfies_the_under_19_or_pregnant_band() {
    let parent = pregnant_member("parent", 31);

    assert!(CalculatedFilter::GreenCardUnder19OrPregnantUnderFive.matches(&parent, as_of()));
    assert!(CalculatedFilter::OtherHealthCarePregnant.matches(&parent, as_of()));
    assert!(!CalculatedFilter::NotPregnantForMassHealthLimited.matches(&parent, as_of()));
    assert!(!CalculatedFilter::NotPregnantOrUnder19ForOmniSalud.matches(&parent, as_of()));
}

#[test]
fn labels_match_their_wire_names() {
    for filter in CalculatedFilter::ALL {
        let encoded = serde_json::to_string(&filter).expect("serializes");
        assert_eq!(encoded, format!("\"{}\"", filter.label()));
    }
    for status in LegalStatus::ALL {
        assert_eq!(status.label().parse::<LegalStatus>(), Ok(status));
    }
    assert!("permanent_resident".parse::<LegalStatus>().is_err());
}

#[test]
fn status_requirements_keep_unknown_labels() {
    let required: Vec<StatusRequirement> =
        serde_json::from_str(r#"["citizen", "gc_18plus_no5", "tribal_member"]"#)
            .expect("requirements parse");

    assert_eq!(
        required,
        vec![
            StatusRequirement::Primary(LegalStatus::Citizen),
            StatusRequirement::Calculated(CalculatedFilter::GreenCard18PlusUnderFive),
            StatusRequirement::Other("tribal_member".to_string()),
        ]
    );
}
