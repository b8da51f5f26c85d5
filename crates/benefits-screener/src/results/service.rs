use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScreeningConfig;

use super::age::ReferenceMonth;
use super::citizenship::FilterState;
use super::domain::{FormData, LegalStatus, Program, ProgramId};
use super::pipeline::filter_programs_generator;
use super::repository::{RepositoryError, ScreenId, ScreenRecord, ScreenRepository};
use super::visibility::ResultsSummary;

/// Filter selection submitted from the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub selected_citizenship: LegalStatus,
    #[serde(default)]
    pub is_admin_view: bool,
    #[serde(default)]
    pub as_of: Option<ReferenceMonth>,
}

/// Programs left after filtering, with the state that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredResults {
    pub filter_state: FilterState,
    pub programs: Vec<Program>,
    pub summary: ResultsSummary,
}

/// Candidate lists must carry unique program ids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("program id {0} appears more than once")]
    DuplicateProgramId(ProgramId),
}

pub fn validate_catalog(programs: &[Program]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(programs.len());
    for program in programs {
        if !seen.insert(program.program_id) {
            return Err(CatalogError::DuplicateProgramId(program.program_id));
        }
    }
    Ok(())
}

/// Run the full filter for one selection without touching a repository.
pub fn screen_programs(
    form_data: &FormData,
    programs: &[Program],
    request: &FilterRequest,
    default_as_of: ReferenceMonth,
) -> Result<FilteredResults, CatalogError> {
    validate_catalog(programs)?;

    let as_of = request.as_of.unwrap_or(default_as_of);
    let filter_state =
        FilterState::calculate(request.selected_citizenship, &form_data.household_data, as_of);
    let programs =
        filter_programs_generator(form_data, &filter_state, request.is_admin_view)(programs);
    let summary = ResultsSummary::from_programs(&programs);

    Ok(FilteredResults {
        filter_state,
        programs,
        summary,
    })
}

/// Service composing the screen repository with the results filter.
pub struct ScreeningService<R> {
    repository: Arc<R>,
    config: ScreeningConfig,
}

impl<R> ScreeningService<R>
where
    R: ScreenRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScreeningConfig) -> Self {
        Self { repository, config }
    }

    /// Store the raw eligibility results for a screen, replacing any earlier copy.
    pub fn store_results(
        &self,
        screen_id: ScreenId,
        form_data: FormData,
        programs: Vec<Program>,
    ) -> Result<ScreenRecord, ScreeningServiceError> {
        validate_catalog(&programs)?;

        let record = ScreenRecord {
            screen_id,
            form_data,
            programs,
        };
        self.repository.save(record.clone())?;

        info!(
            screen_id = %record.screen_id.0,
            programs = record.programs.len(),
            members = record.form_data.household_data.len(),
            "stored screen results"
        );
        Ok(record)
    }

    /// Filter a stored screen's programs for the requested selection.
    pub fn filter(
        &self,
        screen_id: &ScreenId,
        request: &FilterRequest,
    ) -> Result<FilteredResults, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(screen_id)?
            .ok_or(RepositoryError::NotFound)?;

        let results = screen_programs(
            &record.form_data,
            &record.programs,
            request,
            self.config.reference_month(),
        )?;

        info!(
            screen_id = %screen_id.0,
            selected = %request.selected_citizenship,
            admin = request.is_admin_view,
            visible = results.programs.len(),
            "filtered screen results"
        );
        Ok(results)
    }

    /// Fetch the stored record as is.
    pub fn get(&self, screen_id: &ScreenId) -> Result<ScreenRecord, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(screen_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
