use chrono::{Datelike, Utc};
use shared_types::{
    format_case_number, AppError, CaseStatus, ListScope, MissingPerson, MissingPersonSummary,
    NewMissingPerson,
};
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Bump and return the counter for `year` inside the caller's transaction.
/// Format: `MSP-YYYY-NNNNN` (e.g. `MSP-2025-00042`).
async fn next_case_number(
    tx: &mut Transaction<'_, Postgres>,
    year: i32,
) -> Result<String, AppError> {
    let seq: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO case_number_counters AS counters (year, last)
        VALUES ($1, 1)
        ON CONFLICT (year) DO UPDATE SET last = counters.last + 1
        RETURNING last
        "#,
    )
    .bind(year)
    .fetch_one(&mut **tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(format_case_number(year, i64::from(seq)))
}

/// Insert a new report with status `pending`, numbered in the current year.
pub async fn create(
    pool: &Pool<Postgres>,
    record: NewMissingPerson,
) -> Result<MissingPerson, AppError> {
    create_in_year(pool, record, Utc::now().year()).await
}

/// Insert a new report numbered in `year`. The counter bump and the insert
/// commit together.
pub async fn create_in_year(
    pool: &Pool<Postgres>,
    record: NewMissingPerson,
    year: i32,
) -> Result<MissingPerson, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let case_number = next_case_number(&mut tx, year).await?;

    let row = sqlx::query_as::<_, MissingPerson>(
        r#"
        INSERT INTO missing_persons
            (case_number, legal_first_name, legal_last_name, date_of_birth, age, gender,
             town_location, date_of_last_contact, status, reporter_id,
             physical_description, last_seen_wearing, medical_conditions,
             emergency_contacts, possible_locations, circumstances,
             reporter_name, reporter_contact, photo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        RETURNING *
        "#,
    )
    .bind(&case_number)
    .bind(&record.legal_first_name)
    .bind(&record.legal_last_name)
    .bind(record.date_of_birth)
    .bind(record.age)
    .bind(&record.gender)
    .bind(&record.town_location)
    .bind(record.date_of_last_contact)
    .bind(CaseStatus::Pending.as_str())
    .bind(record.reporter_id)
    .bind(&record.physical_description)
    .bind(&record.last_seen_wearing)
    .bind(&record.medical_conditions)
    .bind(&record.emergency_contacts)
    .bind(&record.possible_locations)
    .bind(&record.circumstances)
    .bind(&record.reporter_name)
    .bind(&record.reporter_contact)
    .bind(&record.photo_url)
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(row)
}

/// Find a case by its case number.
pub async fn find_by_case_number(
    pool: &Pool<Postgres>,
    case_number: &str,
) -> Result<Option<MissingPerson>, AppError> {
    sqlx::query_as::<_, MissingPerson>("SELECT * FROM missing_persons WHERE case_number = $1")
        .bind(case_number)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// List projection, newest first, with the assigned agent's username.
pub async fn list(
    pool: &Pool<Postgres>,
    scope: ListScope,
) -> Result<Vec<MissingPersonSummary>, AppError> {
    let (reporter_id, officer_id) = match scope {
        ListScope::All => (None, None),
        ListScope::Reporter(id) => (Some(id), None),
        ListScope::Officer(id) => (None, Some(id)),
    };

    sqlx::query_as::<_, MissingPersonSummary>(
        r#"
        SELECT m.case_number, m.date_of_last_contact, m.legal_last_name, m.legal_first_name,
               m.age, m.gender, m.town_location, m.status, m.officer_id,
               p.username AS officer_username, m.created_at
        FROM missing_persons m
        LEFT JOIN profiles p ON p.id = m.officer_id
        WHERE ($1::uuid IS NULL OR m.reporter_id = $1)
          AND ($2::uuid IS NULL OR m.officer_id = $2)
        ORDER BY m.created_at DESC, m.case_number DESC
        "#,
    )
    .bind(reporter_id)
    .bind(officer_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Overwrite the status. No transition guard.
pub async fn update_status(
    pool: &Pool<Postgres>,
    case_number: &str,
    status: CaseStatus,
) -> Result<Option<MissingPerson>, AppError> {
    sqlx::query_as::<_, MissingPerson>(
        "UPDATE missing_persons SET status = $2 WHERE case_number = $1 RETURNING *",
    )
    .bind(case_number)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Claim an unassigned case for an agent.
pub async fn assign_officer(
    pool: &Pool<Postgres>,
    case_number: &str,
    officer_id: Uuid,
) -> Result<Option<MissingPerson>, AppError> {
    let claimed = sqlx::query_as::<_, MissingPerson>(
        r#"
        UPDATE missing_persons
        SET officer_id = $2,
            status = CASE WHEN status = 'pending' THEN 'active' ELSE status END
        WHERE case_number = $1 AND officer_id IS NULL
        RETURNING *
        "#,
    )
    .bind(case_number)
    .bind(officer_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    match claimed {
        Some(row) => Ok(Some(row)),
        // Already assigned, or no such case.
        None => find_by_case_number(pool, case_number).await,
    }
}
