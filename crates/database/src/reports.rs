//! The analytical reporting script.
//!
//! Each step is a standalone function that borrows an explicit connection, so
//! the whole script can run on one session (and inside one transaction) while
//! the individual queries stay easy to exercise on their own.

use crate::DbError;
use chrono::NaiveDate;
use core_types::User;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgConnection};

/// The literals the script filters on. `Default` reproduces the standard report.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub pathogen: String,
    pub discovered_before: NaiveDate,
    pub excluded_specialization: String,
    /// Doctors need strictly more specializations than this to be listed.
    pub specialization_threshold: i64,
    pub salary_specialization: String,
    pub tracked_disease: String,
    /// Public servants need strictly more summed patients than this to get a raise.
    pub patient_threshold: i64,
    pub name_fragments: Vec<String>,
    pub top_countries: i64,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            pathogen: "bacteria".to_string(),
            discovered_before: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            excluded_specialization: "Infectious Diseases".to_string(),
            specialization_threshold: 2,
            salary_specialization: "Virology".to_string(),
            tracked_disease: "covid-19".to_string(),
            patient_threshold: 3,
            name_fragments: vec!["bek".to_string(), "gul".to_string()],
            top_countries: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DiseaseSummary {
    pub disease_code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DoctorSummary {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub degree: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CountrySalary {
    pub cname: Option<String>,
    pub avg_salary: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DepartmentReach {
    pub department: Option<String>,
    /// Distinct public servants of the department that reported the disease.
    pub num_emp: i64,
    /// Distinct countries those reports cover.
    pub num_countries: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ServantSalary {
    pub email: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub salary: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CountryPatients {
    pub cname: String,
    pub total_patients: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct PatientDiagnosis {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub disease: Option<String>,
}

/// Everything the script printed, step by step.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub early_diseases: Vec<DiseaseSummary>,
    pub doctors_outside_specialization: Vec<DoctorSummary>,
    pub multi_specialized_doctors: Vec<DoctorSummary>,
    pub doctor_salaries: Vec<CountrySalary>,
    pub departments: Vec<DepartmentReach>,
    pub raised_servants: Vec<ServantSalary>,
    pub salaries_doubled: u64,
    pub matched_users: Vec<User>,
    pub users_deleted: u64,
    pub top_countries: Vec<CountryPatients>,
    pub tracked_disease_patients: Option<i64>,
    pub patient_diagnoses: Vec<PatientDiagnosis>,
}

/// 1. Diseases caused by `pathogen` that were first encountered before `before`.
pub async fn diseases_discovered_before(
    conn: &mut PgConnection,
    pathogen: &str,
    before: NaiveDate,
) -> Result<Vec<DiseaseSummary>, DbError> {
    let rows = sqlx::query_as::<_, DiseaseSummary>(
        r#"
        SELECT disease.disease_code, disease.description
        FROM disease
        JOIN discover ON disease.disease_code = discover.disease_code
        WHERE disease.pathogen = $1 AND discover.first_enc_date < $2
        "#,
    )
    .bind(pathogen)
    .bind(before)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 2. Doctors that hold no specialization in a disease type described as `description`.
pub async fn doctors_not_specialized_in(
    conn: &mut PgConnection,
    description: &str,
) -> Result<Vec<DoctorSummary>, DbError> {
    let rows = sqlx::query_as::<_, DoctorSummary>(
        r#"
        SELECT DISTINCT users.name, users.surname, doctor.degree
        FROM users
        JOIN doctor ON users.email = doctor.email
        LEFT JOIN specialize ON doctor.email = specialize.email
        WHERE doctor.email NOT IN (
            SELECT specialize.email
            FROM specialize
            LEFT JOIN diseasetype ON diseasetype.id = specialize.id
            WHERE diseasetype.description = $1
        )
        "#,
    )
    .bind(description)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 3. Doctors specialized in more than `threshold` disease types.
pub async fn doctors_with_specializations_over(
    conn: &mut PgConnection,
    threshold: i64,
) -> Result<Vec<DoctorSummary>, DbError> {
    let rows = sqlx::query_as::<_, DoctorSummary>(
        r#"
        SELECT users.name, users.surname, doctor.degree
        FROM users
        JOIN doctor ON users.email = doctor.email
        JOIN specialize ON doctor.email = specialize.email
        GROUP BY users.email, doctor.degree
        HAVING COUNT(specialize.id) > $1
        "#,
    )
    .bind(threshold)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 4. Average salary per country of doctors specialized in `description`.
pub async fn average_doctor_salary_by_country(
    conn: &mut PgConnection,
    description: &str,
) -> Result<Vec<CountrySalary>, DbError> {
    let rows = sqlx::query_as::<_, CountrySalary>(
        r#"
        SELECT users.cname, ROUND(AVG(users.salary), 3) AS avg_salary
        FROM users
        JOIN doctor ON users.email = doctor.email
        JOIN specialize ON doctor.email = specialize.email
        WHERE specialize.id IN (SELECT id FROM diseasetype WHERE description = $1)
        GROUP BY users.cname
        "#,
    )
    .bind(description)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 5. Departments whose public servants reported `disease` in more than one country.
pub async fn departments_reporting_across_countries(
    conn: &mut PgConnection,
    disease: &str,
) -> Result<Vec<DepartmentReach>, DbError> {
    let rows = sqlx::query_as::<_, DepartmentReach>(
        r#"
        SELECT publicservant.department,
               COUNT(DISTINCT publicservant.email) AS num_emp,
               COUNT(DISTINCT record.cname) AS num_countries
        FROM publicservant
        JOIN record ON publicservant.email = record.email
        WHERE record.disease_code IN (SELECT disease_code FROM disease WHERE description = $1)
        GROUP BY publicservant.department
        HAVING COUNT(DISTINCT record.cname) > 1
        "#,
    )
    .bind(disease)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 6a. Public servants whose summed `disease` patients exceed `threshold`.
pub async fn servants_over_patient_threshold(
    conn: &mut PgConnection,
    disease: &str,
    threshold: i64,
) -> Result<Vec<ServantSalary>, DbError> {
    let rows = sqlx::query_as::<_, ServantSalary>(
        r#"
        SELECT users.email, users.name, users.surname, users.salary
        FROM publicservant
        JOIN users ON publicservant.email = users.email
        JOIN record ON publicservant.email = record.email
        WHERE record.disease_code IN (SELECT disease_code FROM disease WHERE description = $1)
        GROUP BY users.email, users.name, users.surname, users.salary
        HAVING SUM(record.total_patients) > $2
        "#,
    )
    .bind(disease)
    .bind(threshold)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 6b. Doubles the salary of the servants selected by [`servants_over_patient_threshold`].
pub async fn double_servant_salaries(
    conn: &mut PgConnection,
    disease: &str,
    threshold: i64,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET salary = salary * 2
        WHERE email IN (
            SELECT publicservant.email
            FROM publicservant
            JOIN record ON publicservant.email = record.email
            WHERE record.disease_code IN (SELECT disease_code FROM disease WHERE description = $1)
            GROUP BY publicservant.email
            HAVING SUM(record.total_patients) > $2
        )
        "#,
    )
    .bind(disease)
    .bind(threshold)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

/// `LIKE` patterns matching any name containing one of the fragments. Case-sensitive.
fn like_patterns(fragments: &[String]) -> Vec<String> {
    fragments.iter().map(|f| format!("%{f}%")).collect()
}

/// 7a. Users whose name contains any of `fragments`.
pub async fn users_with_name_fragments(
    conn: &mut PgConnection,
    fragments: &[String],
) -> Result<Vec<User>, DbError> {
    let rows = sqlx::query_as::<_, User>(
        "SELECT email, name, surname, salary, phone, cname FROM users WHERE name LIKE ANY($1)",
    )
    .bind(like_patterns(fragments))
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 7b. Deletes the users matched by [`users_with_name_fragments`].
pub async fn delete_users_with_name_fragments(
    conn: &mut PgConnection,
    fragments: &[String],
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM users WHERE name LIKE ANY($1)")
        .bind(like_patterns(fragments))
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// 8. Unique index on `users(email)`.
pub async fn create_users_email_index(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email)")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// 9. Secondary index on `disease(disease_code)`.
pub async fn create_disease_code_index(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_disease_code ON disease (disease_code)")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// 10. The `limit` countries with the most recorded patients. Countries with no counts rank last.
pub async fn top_countries_by_patients(
    conn: &mut PgConnection,
    limit: i64,
) -> Result<Vec<CountryPatients>, DbError> {
    let rows = sqlx::query_as::<_, CountryPatients>(
        r#"
        SELECT record.cname, SUM(record.total_patients) AS total_patients
        FROM record
        GROUP BY record.cname
        ORDER BY total_patients DESC NULLS LAST, record.cname
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// 11. Total recorded patients of diseases described as `disease`. `None` when nothing matches.
pub async fn total_patients_for_disease(
    conn: &mut PgConnection,
    disease: &str,
) -> Result<Option<i64>, DbError> {
    let total = sqlx::query_scalar::<_, Option<i64>>(
        r#"
        SELECT SUM(record.total_patients) AS total_covid_patients
        FROM record
        JOIN disease ON record.disease_code = disease.disease_code
        WHERE disease.description = $1
        "#,
    )
    .bind(disease)
    .fetch_one(&mut *conn)
    .await?;
    Ok(total)
}

/// 12. The `PatientsDiseases` view: every patient's name next to each diagnosed disease.
pub async fn create_patients_diseases_view(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE OR REPLACE VIEW patientsdiseases AS
        SELECT users.name, users.surname, disease.description AS disease
        FROM users
        JOIN patientdisease ON users.email = patientdisease.email
        JOIN disease ON patientdisease.disease_code = disease.disease_code
        "#,
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// 13. Reads the `PatientsDiseases` view.
pub async fn patients_diseases(conn: &mut PgConnection) -> Result<Vec<PatientDiagnosis>, DbError> {
    let rows = sqlx::query_as::<_, PatientDiagnosis>(
        "SELECT name, surname, disease FROM patientsdiseases",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Runs the thirteen steps in order on `conn`.
///
/// The caller owns the transaction boundary: pass a transaction to be able to
/// roll the mutations (salary raise, deletions, index and view creation) back.
pub async fn run_report(
    conn: &mut PgConnection,
    params: &ReportParams,
) -> Result<ReportOutcome, DbError> {
    let early_diseases =
        diseases_discovered_before(conn, &params.pathogen, params.discovered_before).await?;
    tracing::info!(rows = early_diseases.len(), "Step 1: early diseases.");

    let doctors_outside_specialization =
        doctors_not_specialized_in(conn, &params.excluded_specialization).await?;
    tracing::info!(rows = doctors_outside_specialization.len(), "Step 2: doctors outside specialization.");

    let multi_specialized_doctors =
        doctors_with_specializations_over(conn, params.specialization_threshold).await?;
    tracing::info!(rows = multi_specialized_doctors.len(), "Step 3: multi-specialized doctors.");

    let doctor_salaries =
        average_doctor_salary_by_country(conn, &params.salary_specialization).await?;
    tracing::info!(rows = doctor_salaries.len(), "Step 4: doctor salaries by country.");

    let departments = departments_reporting_across_countries(conn, &params.tracked_disease).await?;
    tracing::info!(rows = departments.len(), "Step 5: departments across countries.");

    let raised_servants =
        servants_over_patient_threshold(conn, &params.tracked_disease, params.patient_threshold)
            .await?;
    let salaries_doubled =
        double_servant_salaries(conn, &params.tracked_disease, params.patient_threshold).await?;
    tracing::info!(salaries_doubled, "Step 6: public servant salaries doubled.");

    let matched_users = users_with_name_fragments(conn, &params.name_fragments).await?;
    let users_deleted = delete_users_with_name_fragments(conn, &params.name_fragments).await?;
    tracing::info!(users_deleted, "Step 7: users deleted by name.");

    create_users_email_index(conn).await?;
    create_disease_code_index(conn).await?;
    tracing::info!("Steps 8-9: indexes created.");

    let top_countries = top_countries_by_patients(conn, params.top_countries).await?;
    let tracked_disease_patients = total_patients_for_disease(conn, &params.tracked_disease).await?;
    tracing::info!(?tracked_disease_patients, "Steps 10-11: patient totals.");

    create_patients_diseases_view(conn).await?;
    let patient_diagnoses = patients_diseases(conn).await?;
    tracing::info!(rows = patient_diagnoses.len(), "Steps 12-13: patients diseases view.");

    Ok(ReportOutcome {
        early_diseases,
        doctors_outside_specialization,
        multi_specialized_doctors,
        doctor_salaries,
        departments,
        raised_servants,
        salaries_doubled,
        matched_users,
        users_deleted,
        top_countries,
        tracked_disease_patients,
        patient_diagnoses,
    })
}
