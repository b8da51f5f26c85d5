use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::age::{member_age, ReferenceMonth};
use super::domain::{HouseholdMember, LegalStatus};

/// Age- or condition-based eligibility labels layered on top of a primary legal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CalculatedFilter {
    #[serde(rename = "otherHealthCareUnder19")]
    OtherHealthCareUnder19,
    #[serde(rename = "otherHealthCarePregnant")]
    OtherHealthCarePregnant,
    #[serde(rename = "notPregnantOrUnder19ForOmniSalud")]
    NotPregnantOrUnder19ForOmniSalud,
    #[serde(rename = "notPregnantOrUnder19ForEmergencyMedicaid")]
    NotPregnantOrUnder19ForEmergencyMedicaid,
    #[serde(rename = "notPregnantForMassHealthLimited")]
    NotPregnantForMassHealthLimited,
    #[serde(rename = "notPregnantOrChildForMassHealthLimited")]
    NotPregnantOrChildForMassHealthLimited,
    #[serde(rename = "gc_18plus_no5")]
    GreenCard18PlusUnderFive,
    #[serde(rename = "gc_under18_no5")]
    GreenCardUnder18UnderFive,
    #[serde(rename = "gc_under19_pregnant_no5")]
    GreenCardUnder19OrPregnantUnderFive,
}

/// Predicate plus the primary statuses under which it is evaluated at all.
#[derive(Clone, Copy)]
pub struct CitizenshipFilter {
    pub predicate: fn(&HouseholdMember, ReferenceMonth) -> bool,
    pub linked_filters: &'static [LegalStatus],
}

impl fmt::Debug for CitizenshipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CitizenshipFilter")
            .field("linked_filters", &self.linked_filters)
            .finish_non_exhaustive()
    }
}

const NON_CITIZEN: &[LegalStatus] = &[LegalStatus::NonCitizen];
const GREEN_CARD_UNDER_FIVE: &[LegalStatus] = &[LegalStatus::GreenCardUnderFive];

const CHILD_AGE: u32 = 19;
const ADULT_AGE: u32 = 18;

fn under(member: &HouseholdMember, as_of: ReferenceMonth, limit: u32) -> bool {
    member_age(member, as_of).is_some_and(|age| age < limit)
}

fn at_least(member: &HouseholdMember, as_of: ReferenceMonth, limit: u32) -> bool {
    member_age(member, as_of).is_some_and(|age| age >= limit)
}

fn pregnant(member: &HouseholdMember) -> bool {
    member.conditions.pregnant
}

fn not_pregnant_adult(member: &HouseholdMember, as_of: ReferenceMonth) -> bool {
    !pregnant(member) && at_least(member, as_of, CHILD_AGE)
}

impl CalculatedFilter {
    pub const ALL: [CalculatedFilter; 9] = [
        CalculatedFilter::OtherHealthCareUnder19,
        CalculatedFilter::OtherHealthCarePregnant,
        CalculatedFilter::NotPregnantOrUnder19ForOmniSalud,
        CalculatedFilter::NotPregnantOrUnder19ForEmergencyMedicaid,
        CalculatedFilter::NotPregnantForMassHealthLimited,
        CalculatedFilter::NotPregnantOrChildForMassHealthLimited,
        CalculatedFilter::GreenCard18PlusUnderFive,
        CalculatedFilter::GreenCardUnder18UnderFive,
        CalculatedFilter::GreenCardUnder19OrPregnantUnderFive,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CalculatedFilter::OtherHealthCareUnder19 => "otherHealthCareUnder19",
            CalculatedFilter::OtherHealthCarePregnant => "otherHealthCarePregnant",
            CalculatedFilter::NotPregnantOrUnder19ForOmniSalud => {
                "notPregnantOrUnder19ForOmniSalud"
            }
            CalculatedFilter::NotPregnantOrUnder19ForEmergencyMedicaid => {
                "notPregnantOrUnder19ForEmergencyMedicaid"
            }
            CalculatedFilter::NotPregnantForMassHealthLimited => "notPregnantForMassHealthLimited",
            CalculatedFilter::NotPregnantOrChildForMassHealthLimited => {
                "notPregnantOrChildForMassHealthLimited"
            }
            CalculatedFilter::GreenCard18PlusUnderFive => "gc_18plus_no5",
            CalculatedFilter::GreenCardUnder18UnderFive => "gc_under18_no5",
            CalculatedFilter::GreenCardUnder19OrPregnantUnderFive => "gc_under19_pregnant_no5",
        }
    }

    pub fn config(self) -> CitizenshipFilter {
        match self {
            CalculatedFilter::OtherHealthCareUnder19 => CitizenshipFilter {
                predicate: |member, as_of| under(member, as_of, CHILD_AGE),
                linked_filters: NON_CITIZEN,
            },
            CalculatedFilter::OtherHealthCarePregnant => CitizenshipFilter {
                predicate: |member, _| pregnant(member),
                linked_filters: NON_CITIZEN,
            },
            CalculatedFilter::NotPregnantOrUnder19ForOmniSalud
            | CalculatedFilter::NotPregnantOrUnder19ForEmergencyMedicaid
            | CalculatedFilter::NotPregnantOrChildForMassHealthLimited => CitizenshipFilter {
                predicate: not_pregnant_adult,
                linked_filters: NON_CITIZEN,
            },
            CalculatedFilter::NotPregnantForMassHealthLimited => CitizenshipFilter {
                predicate: |member, _| !pregnant(member),
                linked_filters: NON_CITIZEN,
            },
            CalculatedFilter::GreenCard18PlusUnderFive => CitizenshipFilter {
                predicate: |member, as_of| at_least(member, as_of, ADULT_AGE),
                linked_filters: GREEN_CARD_UNDER_FIVE,
            },
            CalculatedFilter::GreenCardUnder18UnderFive => CitizenshipFilter {
                predicate: |member, as_of| under(member, as_of, ADULT_AGE),
                linked_filters: GREEN_CARD_UNDER_FIVE,
            },
            CalculatedFilter::GreenCardUnder19OrPregnantUnderFive => CitizenshipFilter {
                predicate: |member, as_of| pregnant(member) || under(member, as_of, CHILD_AGE),
                linked_filters: GREEN_CARD_UNDER_FIVE,
            },
        }
    }

    pub fn matches(self, member: &HouseholdMember, as_of: ReferenceMonth) -> bool {
        (self.config().predicate)(member, as_of)
    }

    pub fn linked_filters(self) -> &'static [LegalStatus] {
        self.config().linked_filters
    }

    pub fn is_linked_to(self, status: LegalStatus) -> bool {
        self.linked_filters().contains(&status)
    }
}

impl fmt::Display for CalculatedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calculated labels that apply to `household` under the `selected` primary status.
///
/// A label is active when it is linked to the selection and at least one member satisfies it.
pub fn calculate_derived_filters(
    selected: LegalStatus,
    household: &[HouseholdMember],
    as_of: ReferenceMonth,
) -> BTreeSet<CalculatedFilter> {
    CalculatedFilter::ALL
        .into_iter()
        .filter(|filter| filter.is_linked_to(selected))
        .filter(|filter| household.iter().any(|member| filter.matches(member, as_of)))
        .collect()
}

/// Filter context derived from a single primary-status selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_citizenship: LegalStatus,
    pub calculated_filters: BTreeSet<CalculatedFilter>,
    pub as_of: ReferenceMonth,
}

impl FilterState {
    /// Recompute the whole state for a new selection.
    pub fn calculate(
        selected: LegalStatus,
        household: &[HouseholdMember],
        as_of: ReferenceMonth,
    ) -> Self {
        Self {
            selected_citizenship: selected,
            calculated_filters: calculate_derived_filters(selected, household, as_of),
            as_of,
        }
    }

    pub fn is_active(&self, filter: CalculatedFilter) -> bool {
        self.calculated_filters.contains(&filter)
    }
}
