use tracing::debug;

use super::citizenship::{CalculatedFilter, FilterState};
use super::domain::{HouseholdMember, MemberEligibility, Program};

/// Re-derive per-member eligibility for the current filter selection.
///
/// Works on a clone; `programs` is left untouched. A member loses eligibility for a program only
/// when the program asks for at least one active calculated label and the member satisfies none
/// of them. Programs that accept the selected primary status directly are copied unchanged.
pub fn update_member_eligibilities(
    programs: &[Program],
    household: &[HouseholdMember],
    filter_state: &FilterState,
) -> Vec<Program> {
    let mut updated = programs.to_vec();

    for program in &mut updated {
        if program.requires_status(filter_state.selected_citizenship) {
            continue;
        }

        let applicable: Vec<CalculatedFilter> = filter_state
            .calculated_filters
            .iter()
            .copied()
            .filter(|filter| program.requires_calculated(*filter))
            .collect();

        if applicable.is_empty() {
            continue;
        }

        for eligibility in &mut program.members {
            let Some(member) = household
                .iter()
                .find(|member| member.frontend_id == eligibility.frontend_id)
            else {
                debug!(
                    program_id = %program.program_id,
                    frontend_id = %eligibility.frontend_id.0,
                    "no household member matches program member entry; leaving it unchanged"
                );
                continue;
            };

            revoke_unless_any_match(eligibility, member, &applicable, filter_state);
        }
    }

    updated
}

fn revoke_unless_any_match(
    eligibility: &mut MemberEligibility,
    member: &HouseholdMember,
    applicable: &[CalculatedFilter],
    filter_state: &FilterState,
) {
    let passes = applicable
        .iter()
        .any(|filter| filter.matches(member, filter_state.as_of));

    if !passes {
        eligibility.eligible = false;
        eligibility.value = 0.0;
    }
}
