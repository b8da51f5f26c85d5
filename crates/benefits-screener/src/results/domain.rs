use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::citizenship::CalculatedFilter;

/// Opaque household member identifier shared between form data and program results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

/// Stable identifier assigned to a benefit program by the eligibility API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub u32);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Household-level form record collected by the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub household_data: Vec<HouseholdMember>,
}

/// One person in the household as captured by the member step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub frontend_id: MemberId,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub birth_month: Option<u32>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub conditions: MemberConditions,
}

/// Special circumstances flagged for a member. Absent flags read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberConditions {
    pub pregnant: bool,
    pub student: bool,
    pub disabled: bool,
    pub blind_or_visually_impaired: bool,
    pub long_term_disability: bool,
}

/// Primary citizenship or immigration status selected on the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LegalStatus {
    #[serde(rename = "citizen")]
    Citizen,
    #[serde(rename = "non_citizen")]
    NonCitizen,
    #[serde(rename = "gc_5plus")]
    GreenCardFivePlus,
    #[serde(rename = "gc_5less")]
    GreenCardUnderFive,
    #[serde(rename = "refugee")]
    Refugee,
    #[serde(rename = "otherWithWorkPermission")]
    OtherWithWorkPermission,
}

impl LegalStatus {
    pub const ALL: [LegalStatus; 6] = [
        LegalStatus::Citizen,
        LegalStatus::NonCitizen,
        LegalStatus::GreenCardFivePlus,
        LegalStatus::GreenCardUnderFive,
        LegalStatus::Refugee,
        LegalStatus::OtherWithWorkPermission,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LegalStatus::Citizen => "citizen",
            LegalStatus::NonCitizen => "non_citizen",
            LegalStatus::GreenCardFivePlus => "gc_5plus",
            LegalStatus::GreenCardUnderFive => "gc_5less",
            LegalStatus::Refugee => "refugee",
            LegalStatus::OtherWithWorkPermission => "otherWithWorkPermission",
        }
    }
}

impl fmt::Display for LegalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown legal status '{0}'")]
pub struct UnknownLegalStatus(pub String);

impl FromStr for LegalStatus {
    type Err = UnknownLegalStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        LegalStatus::ALL
            .into_iter()
            .find(|status| status.label() == trimmed)
            .ok_or_else(|| UnknownLegalStatus(trimmed.to_string()))
    }
}

/// A single entry of a program's `legal_status_required` list.
///
/// Labels the screener does not know about are kept verbatim so the list round-trips, but they
/// never satisfy a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusRequirement {
    Primary(LegalStatus),
    Calculated(CalculatedFilter),
    Other(String),
}

impl StatusRequirement {
    pub fn is_primary(&self, status: LegalStatus) -> bool {
        matches!(self, StatusRequirement::Primary(required) if *required == status)
    }

    pub fn calculated(&self) -> Option<CalculatedFilter> {
        match self {
            StatusRequirement::Calculated(filter) => Some(*filter),
            _ => None,
        }
    }
}

impl From<LegalStatus> for StatusRequirement {
    fn from(value: LegalStatus) -> Self {
        StatusRequirement::Primary(value)
    }
}

impl From<CalculatedFilter> for StatusRequirement {
    fn from(value: CalculatedFilter) -> Self {
        StatusRequirement::Calculated(value)
    }
}

/// Candidate benefit program as returned by the eligibility API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub program_id: ProgramId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub legal_status_required: Vec<StatusRequirement>,
    pub eligible: bool,
    #[serde(default)]
    pub household_value: f64,
    #[serde(default)]
    pub estimated_value: f64,
    #[serde(default)]
    pub already_has: bool,
    #[serde(default)]
    pub excludes_programs: Option<Vec<ProgramId>>,
    #[serde(default)]
    pub members: Vec<MemberEligibility>,
}

impl Program {
    pub fn requires_status(&self, status: LegalStatus) -> bool {
        self.legal_status_required
            .iter()
            .any(|requirement| requirement.is_primary(status))
    }

    pub fn requires_calculated(&self, filter: CalculatedFilter) -> bool {
        self.legal_status_required
            .iter()
            .any(|requirement| requirement.calculated() == Some(filter))
    }

    /// Program ids this program suppresses while visible; `None` reads as empty.
    pub fn excluded_ids(&self) -> &[ProgramId] {
        self.excludes_programs.as_deref().unwrap_or(&[])
    }
}

/// Program-scoped eligibility of one household member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEligibility {
    pub frontend_id: MemberId,
    pub eligible: bool,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub already_has: bool,
}
