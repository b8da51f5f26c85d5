//! Results-page filtering: citizenship filters, member eligibility, and program exclusions.
//!
//! The pipeline is pure. `FilterState::calculate` derives the active calculated labels for a
//! primary legal-status selection, `update_member_eligibilities` revokes member eligibility on a
//! copy of the candidate programs, and `resolve_exclusions` keeps the programs that pass the
//! basic visibility checks and are not suppressed by another visible program.
//! `filter_programs_generator` composes the stages into the single entry point callers use.

pub mod age;
pub mod citizenship;
pub mod domain;
pub mod eligibility;
pub mod exclusion;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod service;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use age::{age_at, member_age, ReferenceMonth, ReferenceMonthError};
pub use citizenship::{calculate_derived_filters, CalculatedFilter, CitizenshipFilter, FilterState};
pub use domain::{
    FormData, HouseholdMember, LegalStatus, MemberConditions, MemberEligibility, MemberId,
    Program, ProgramId, StatusRequirement, UnknownLegalStatus,
};
pub use eligibility::update_member_eligibilities;
pub use exclusion::{resolve_exclusions, ExclusionResolver};
pub use pipeline::filter_programs_generator;
pub use repository::{RepositoryError, ScreenId, ScreenRecord, ScreenRepository};
pub use router::{results_router, StoreResultsRequest};
pub use service::{
    screen_programs, validate_catalog, CatalogError, FilterRequest, FilteredResults,
    ScreeningService, ScreeningServiceError,
};
pub use visibility::{filter_visible, is_basically_visible, program_value, ResultsSummary};
