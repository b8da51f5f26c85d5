use super::citizenship::FilterState;
use super::domain::{FormData, Program};
use super::eligibility::update_member_eligibilities;
use super::exclusion::resolve_exclusions;

/// Build the results-page filter for the current form data and filter selection.
///
/// The returned closure updates member eligibilities on a copy of the candidate list and then
/// either returns it untouched (admin view) or resolves exclusions among the visible programs.
pub fn filter_programs_generator<'a>(
    form_data: &'a FormData,
    filter_state: &'a FilterState,
    is_admin_view: bool,
) -> impl Fn(&[Program]) -> Vec<Program> + 'a {
    move |programs: &[Program]| {
        let updated =
            update_member_eligibilities(programs, &form_data.household_data, filter_state);
        resolve_exclusions(&updated, filter_state, is_admin_view)
    }
}
