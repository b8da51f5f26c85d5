use crate::infra::{parse_legal_status, parse_reference_month, InMemoryScreenRepository};
use benefits_screener::config::ScreeningConfig;
use benefits_screener::error::AppError;
use benefits_screener::results::{
    program_value, screen_programs, CalculatedFilter, FilterRequest, FilteredResults, FormData,
    HouseholdMember, LegalStatus, MemberConditions, MemberEligibility, MemberId, Program,
    ProgramId, ReferenceMonth, ScreenId, ScreeningService, StatusRequirement,
};
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// JSON file with `form_data`, `programs`, and optionally `selected_citizenship`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Legal status to filter by; every status is shown when neither this nor the file sets one
    #[arg(long, value_parser = parse_legal_status)]
    pub(crate) citizenship: Option<LegalStatus>,
    /// Reference month for age calculations (YYYY-MM, defaults to the current month)
    #[arg(long, value_parser = parse_reference_month)]
    pub(crate) as_of: Option<ReferenceMonth>,
    /// Show every program without filtering (admin view)
    #[arg(long)]
    pub(crate) admin: bool,
    /// Print the filtered results as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference month for age calculations (YYYY-MM, defaults to the current month)
    #[arg(long, value_parser = parse_reference_month)]
    pub(crate) as_of: Option<ReferenceMonth>,
    /// Include the admin view after the per-status listings
    #[arg(long)]
    pub(crate) include_admin: bool,
}

#[derive(Debug, Deserialize)]
struct ScreenFile {
    #[serde(default)]
    form_data: FormData,
    programs: Vec<Program>,
    #[serde(default)]
    selected_citizenship: Option<LegalStatus>,
    #[serde(default)]
    is_admin_view: bool,
    #[serde(default)]
    as_of: Option<ReferenceMonth>,
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        input,
        citizenship,
        as_of,
        admin,
        json,
    } = args;

    let raw = fs::read_to_string(&input)?;
    let file: ScreenFile = serde_json::from_str(&raw)?;
    let as_of = as_of
        .or(file.as_of)
        .unwrap_or_else(ReferenceMonth::current);
    let is_admin_view = admin || file.is_admin_view;

    let selections: Vec<LegalStatus> = match citizenship.or(file.selected_citizenship) {
        Some(status) => vec![status],
        None => LegalStatus::ALL.to_vec(),
    };

    for selected in selections {
        let request = FilterRequest {
            selected_citizenship: selected,
            is_admin_view,
            as_of: Some(as_of),
        };
        let results = screen_programs(&file.form_data, &file.programs, &request, as_of)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            render_results(&results, is_admin_view);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        include_admin,
    } = args;

    let as_of = as_of.unwrap_or_else(ReferenceMonth::current);
    let repository = Arc::new(InMemoryScreenRepository::default());
    let service = ScreeningService::new(
        repository.clone(),
        ScreeningConfig { as_of: Some(as_of) },
    );

    println!("Benefits screener results demo (ages as of {as_of})");
    let screen_id = ScreenId("demo-household".to_string());
    let record = service.store_results(
        screen_id.clone(),
        demo_household(as_of),
        demo_programs(),
    )?;
    println!(
        "- Stored {} candidate programs for {} household members ({} screen(s) on file)",
        record.programs.len(),
        record.form_data.household_data.len(),
        repository.len()
    );

    for selected in LegalStatus::ALL {
        let request = FilterRequest {
            selected_citizenship: selected,
            is_admin_view: false,
            as_of: None,
        };
        let results = service.filter(&screen_id, &request)?;
        render_results(&results, false);
    }

    if include_admin {
        let request = FilterRequest {
            selected_citizenship: LegalStatus::Citizen,
            is_admin_view: true,
            as_of: None,
        };
        let results = service.filter(&screen_id, &request)?;
        render_results(&results, true);
    }

    Ok(())
}

fn render_results(results: &FilteredResults, is_admin_view: bool) {
    let state = &results.filter_state;
    let view = if is_admin_view { " [admin view]" } else { "" };
    println!("\nSelected status: {}{}", state.selected_citizenship, view);

    if state.calculated_filters.is_empty() {
        println!("  Calculated filters: none");
    } else {
        let labels: Vec<&str> = state
            .calculated_filters
            .iter()
            .map(|filter| filter.label())
            .collect();
        println!("  Calculated filters: {}", labels.join(", "));
    }

    if results.programs.is_empty() {
        println!("  No programs visible");
        return;
    }

    for program in &results.programs {
        let ineligible: Vec<&str> = program
            .members
            .iter()
            .filter(|member| !member.eligible)
            .map(|member| member.frontend_id.0.as_str())
            .collect();
        let suffix = if ineligible.is_empty() {
            String::new()
        } else {
            format!(" (not eligible: {})", ineligible.join(", "))
        };
        println!(
            "  - #{} {}: ${:.0}{}",
            program.program_id,
            program.name,
            program_value(program),
            suffix
        );
    }
    println!(
        "  Total: {} program(s) worth ${:.0}",
        results.summary.program_count, results.summary.total_value
    );
}

fn demo_member(id: &str, age: i32, as_of: ReferenceMonth, pregnant: bool) -> HouseholdMember {
    HouseholdMember {
        frontend_id: MemberId(id.to_string()),
        birth_year: Some(as_of.year() - age),
        birth_month: Some(1),
        relationship: None,
        conditions: MemberConditions {
            pregnant,
            ..MemberConditions::default()
        },
    }
}

fn demo_household(as_of: ReferenceMonth) -> FormData {
    FormData {
        household_data: vec![
            demo_member("head", 36, as_of, false),
            demo_member("spouse", 29, as_of, true),
            demo_member("child", 7, as_of, false),
        ],
    }
}

fn demo_program(
    id: u32,
    name: &str,
    required: Vec<StatusRequirement>,
    household_value: f64,
    member_value: f64,
) -> Program {
    let members = if member_value > 0.0 {
        ["head", "spouse", "child"]
            .into_iter()
            .map(|member| MemberEligibility {
                frontend_id: MemberId(member.to_string()),
                eligible: true,
                value: member_value,
                already_has: false,
            })
            .collect()
    } else {
        Vec::new()
    };

    Program {
        program_id: ProgramId(id),
        name: name.to_string(),
        legal_status_required: required,
        eligible: true,
        household_value,
        estimated_value: household_value + member_value * members.len() as f64,
        already_has: false,
        excludes_programs: None,
        members,
    }
}

fn demo_programs() -> Vec<Program> {
    let citizen_like = || -> Vec<StatusRequirement> {
        vec![
            LegalStatus::Citizen.into(),
            LegalStatus::GreenCardFivePlus.into(),
            LegalStatus::Refugee.into(),
        ]
    };

    let mut medicaid = demo_program(1, "Medicaid", citizen_like(), 0.0, 310.0);
    medicaid.excludes_programs = Some(vec![ProgramId(4)]);

    let mut emergency_medicaid = demo_program(
        4,
        "Emergency Medicaid",
        vec![
            CalculatedFilter::NotPregnantOrUnder19ForEmergencyMedicaid.into(),
            CalculatedFilter::GreenCard18PlusUnderFive.into(),
        ],
        0.0,
        120.0,
    );
    emergency_medicaid.excludes_programs = Some(vec![ProgramId(5)]);

    vec![
        demo_program(2, "SNAP", citizen_like(), 450.0, 0.0),
        medicaid,
        demo_program(
            3,
            "Child Health Plan Plus",
            vec![
                LegalStatus::Citizen.into(),
                CalculatedFilter::OtherHealthCareUnder19.into(),
                CalculatedFilter::GreenCardUnder19OrPregnantUnderFive.into(),
            ],
            0.0,
            180.0,
        ),
        emergency_medicaid,
        demo_program(
            5,
            "Limited Coverage for Adults",
            vec![CalculatedFilter::NotPregnantOrChildForMassHealthLimited.into()],
            75.0,
            0.0,
        ),
        demo_program(
            6,
            "Prenatal Care Program",
            vec![CalculatedFilter::OtherHealthCarePregnant.into()],
            0.0,
            260.0,
        ),
        demo_program(
            7,
            "Work Permit Tax Credit",
            vec![LegalStatus::OtherWithWorkPermission.into(), LegalStatus::Citizen.into()],
            90.0,
            0.0,
        ),
    ]
}
