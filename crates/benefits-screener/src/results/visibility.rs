use serde::{Deserialize, Serialize};

use super::citizenship::FilterState;
use super::domain::Program;

/// Household value plus the value of every member who does not already receive the program.
pub fn program_value(program: &Program) -> f64 {
    let member_value: f64 = program
        .members
        .iter()
        .filter(|member| !member.already_has)
        .map(|member| member.value)
        .sum();

    program.household_value + member_value
}

/// Legal-status match, overall eligibility, positive value, and not already held.
pub fn is_basically_visible(program: &Program, filter_state: &FilterState) -> bool {
    let status_matches = program.legal_status_required.iter().any(|requirement| {
        requirement.is_primary(filter_state.selected_citizenship)
            || requirement
                .calculated()
                .is_some_and(|filter| filter_state.is_active(filter))
    });

    status_matches && program.eligible && program_value(program) > 0.0 && !program.already_has
}

/// Keep the programs that pass the basic checks. The admin view keeps everything.
pub fn filter_visible(
    programs: &[Program],
    filter_state: &FilterState,
    is_admin_view: bool,
) -> Vec<Program> {
    if is_admin_view {
        return programs.to_vec();
    }

    programs
        .iter()
        .filter(|program| is_basically_visible(program, filter_state))
        .cloned()
        .collect()
}

/// Headline figures for a list of visible programs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub program_count: usize,
    pub total_value: f64,
}

impl ResultsSummary {
    pub fn from_programs(programs: &[Program]) -> Self {
        Self {
            program_count: programs.len(),
            total_value: programs.iter().map(program_value).sum(),
        }
    }
}
