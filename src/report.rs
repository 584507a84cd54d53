use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use database::{PgPool, ReportOutcome, ReportParams};
use std::fmt::Display;

#[derive(Args)]
pub struct ReportArgs {
    /// Roll back the salary raise, deletions, indexes and view instead of committing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the reporting script in one transaction and prints every result set.
pub async fn handle_report(args: ReportArgs, pool: PgPool) -> anyhow::Result<()> {
    let params = ReportParams::default();

    let mut tx = pool.begin().await?;
    let outcome = database::run_report(&mut tx, &params).await?;
    if args.dry_run {
        tx.rollback().await?;
        tracing::info!("Dry run: all report mutations rolled back.");
    } else {
        tx.commit().await?;
    }

    print_outcome(&outcome, &params);
    Ok(())
}

fn cell<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

fn print_table(title: &str, header: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    println!("\n{title}\n{table}");
}

fn print_outcome(outcome: &ReportOutcome, params: &ReportParams) {
    print_table(
        &format!(
            "1. Diseases caused by {} discovered before {}",
            params.pathogen, params.discovered_before
        ),
        &["disease_code", "description"],
        outcome
            .early_diseases
            .iter()
            .map(|d| vec![d.disease_code.clone(), cell(&d.description)])
            .collect(),
    );

    print_table(
        &format!(
            "2. Doctors not specialized in {}",
            params.excluded_specialization
        ),
        &["name", "surname", "degree"],
        outcome
            .doctors_outside_specialization
            .iter()
            .map(|d| vec![cell(&d.name), cell(&d.surname), cell(&d.degree)])
            .collect(),
    );

    print_table(
        &format!(
            "3. Doctors specialized in more than {} disease types",
            params.specialization_threshold
        ),
        &["name", "surname", "degree"],
        outcome
            .multi_specialized_doctors
            .iter()
            .map(|d| vec![cell(&d.name), cell(&d.surname), cell(&d.degree)])
            .collect(),
    );

    print_table(
        &format!(
            "4. Average salary of {} doctors by country",
            params.salary_specialization
        ),
        &["cname", "avg_salary"],
        outcome
            .doctor_salaries
            .iter()
            .map(|s| vec![cell(&s.cname), cell(&s.avg_salary)])
            .collect(),
    );

    print_table(
        &format!(
            "5. Departments reporting {} in more than one country",
            params.tracked_disease
        ),
        &["department", "num_emp", "num_countries"],
        outcome
            .departments
            .iter()
            .map(|d| {
                vec![
                    cell(&d.department),
                    d.num_emp.to_string(),
                    d.num_countries.to_string(),
                ]
            })
            .collect(),
    );

    print_table(
        &format!(
            "6. Public servants with more than {} {} patients ({} salaries doubled)",
            params.patient_threshold, params.tracked_disease, outcome.salaries_doubled
        ),
        &["email", "name", "surname", "salary before"],
        outcome
            .raised_servants
            .iter()
            .map(|s| {
                vec![
                    s.email.clone(),
                    cell(&s.name),
                    cell(&s.surname),
                    cell(&s.salary),
                ]
            })
            .collect(),
    );

    print_table(
        &format!(
            "7. Users whose name contains {} ({} deleted)",
            params.name_fragments.join(" or "),
            outcome.users_deleted
        ),
        &["email", "name", "surname", "salary", "phone", "cname"],
        outcome
            .matched_users
            .iter()
            .map(|u| {
                vec![
                    u.email.clone(),
                    cell(&u.name),
                    cell(&u.surname),
                    cell(&u.salary),
                    cell(&u.phone),
                    cell(&u.cname),
                ]
            })
            .collect(),
    );

    println!("\n8-9. Indexes idx_users_email and idx_disease_code are in place.");

    print_table(
        &format!("10. Top {} countries by recorded patients", params.top_countries),
        &["cname", "total_patients"],
        outcome
            .top_countries
            .iter()
            .map(|c| vec![c.cname.clone(), cell(&c.total_patients)])
            .collect(),
    );

    println!(
        "\n11. Total {} patients: {}",
        params.tracked_disease,
        cell(&outcome.tracked_disease_patients)
    );

    print_table(
        "12-13. PatientsDiseases view",
        &["name", "surname", "disease"],
        outcome
            .patient_diagnoses
            .iter()
            .map(|p| vec![cell(&p.name), cell(&p.surname), cell(&p.disease)])
            .collect(),
    );
}
