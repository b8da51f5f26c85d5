use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::ScreeningConfig;
use crate::results::age::ReferenceMonth;
use crate::results::citizenship::FilterState;
use crate::results::domain::{
    FormData, HouseholdMember, LegalStatus, MemberConditions, MemberEligibility, MemberId,
    Program, ProgramId, StatusRequirement,
};
use crate::results::repository::{RepositoryError, ScreenId, ScreenRecord, ScreenRepository};
use crate::results::service::ScreeningService;

pub(super) fn as_of() -> ReferenceMonth {
    ReferenceMonth::new(2025, 6).expect("valid month")
}

/// Member born in January of the year that makes them `age` at `as_of()`.
pub(super) fn member(id: &str, age: i32) -> HouseholdMember {
    HouseholdMember {
        frontend_id: MemberId(id.to_string()),
        birth_year: Some(as_of().year() - age),
        birth_month: Some(1),
        relationship: None,
        conditions: MemberConditions::default(),
    }
}

pub(super) fn pregnant_member(id: &str, age: i32) -> HouseholdMember {
    let mut member = member(id, age);
    member.conditions.pregnant = true;
    member
}

pub(super) fn form_data(household: Vec<HouseholdMember>) -> FormData {
    FormData {
        household_data: household,
    }
}

pub(super) fn state(selected: LegalStatus, household: &[HouseholdMember]) -> FilterState {
    FilterState::calculate(selected, household, as_of())
}

pub(super) fn requirements<I, R>(items: I) -> Vec<StatusRequirement>
where
    I: IntoIterator<Item = R>,
    R: Into<StatusRequirement>,
{
    items.into_iter().map(Into::into).collect()
}

/// Eligible program worth 100 at the household level with no member entries.
pub(super) fn program(id: u32, required: Vec<StatusRequirement>) -> Program {
    Program {
        program_id: ProgramId(id),
        name: format!("Program {id}"),
        legal_status_required: required,
        eligible: true,
        household_value: 100.0,
        estimated_value: 100.0,
        already_has: false,
        excludes_programs: None,
        members: Vec::new(),
    }
}

/// Eligible program whose whole value comes from per-member entries.
pub(super) fn member_program(
    id: u32,
    required: Vec<StatusRequirement>,
    members: &[&str],
    value: f64,
) -> Program {
    let mut program = program(id, required);
    program.household_value = 0.0;
    program.estimated_value = value * members.len() as f64;
    program.members = members
        .iter()
        .map(|member| MemberEligibility {
            frontend_id: MemberId(member.to_string()),
            eligible: true,
            value,
            already_has: false,
        })
        .collect();
    program
}

pub(super) fn excluding(mut program: Program, excluded: &[u32]) -> Program {
    program.excludes_programs = Some(excluded.iter().copied().map(ProgramId).collect());
    program
}

pub(super) fn citizen_program(id: u32) -> Program {
    program(id, requirements([LegalStatus::Citizen]))
}

pub(super) fn ids(programs: &[Program]) -> Vec<u32> {
    programs.iter().map(|program| program.program_id.0).collect()
}

pub(super) fn member_entry<'a>(program: &'a Program, id: &str) -> &'a MemberEligibility {
    program
        .members
        .iter()
        .find(|member| member.frontend_id.0 == id)
        .expect("member entry present")
}

pub(super) fn screening_config() -> ScreeningConfig {
    ScreeningConfig {
        as_of: Some(as_of()),
    }
}

pub(super) fn build_service() -> (ScreeningService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ScreeningService::new(repository.clone(), screening_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ScreenId, ScreenRecord>>>,
}

impl ScreenRepository for MemoryRepository {
    fn save(&self, record: ScreenRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.screen_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ScreenId) -> Result<Option<ScreenRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ScreenRepository for UnavailableRepository {
    fn save(&self, _record: ScreenRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ScreenId) -> Result<Option<ScreenRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
