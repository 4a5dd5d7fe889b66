use shared_types::{AppError, CaseStatus, MissingPerson, CASE_STATUSES};
use uuid::Uuid;

use crate::store::CaseStore;

/// Parse a submitted status value.
pub fn parse_status(raw: &str) -> Result<CaseStatus, AppError> {
    CaseStatus::parse(raw).ok_or_else(|| {
        AppError::bad_request(format!(
            "Invalid status: {}. Must be one of: {}",
            raw.trim(),
            CASE_STATUSES.join(", ")
        ))
    })
}

/// Overwrite the status of a case. Any status may replace any other.
#[tracing::instrument(skip(cases))]
pub async fn update_case_status(
    cases: &dyn CaseStore,
    case_number: &str,
    raw_status: &str,
) -> Result<MissingPerson, AppError> {
    let status = parse_status(raw_status)?;

    let row = cases
        .update_missing_status(case_number, status)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_number)))?;

    tracing::info!(status = %status, "Case status updated");
    Ok(row)
}

/// Assign an unassigned case to the agent. Already-assigned cases are
/// returned unchanged.
#[tracing::instrument(skip(cases))]
pub async fn take_case(
    cases: &dyn CaseStore,
    case_number: &str,
    officer_id: Uuid,
) -> Result<MissingPerson, AppError> {
    let row = cases
        .assign_officer(case_number, officer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_number)))?;

    if row.officer_id == Some(officer_id) {
        tracing::info!(status = %row.status, "Case assigned");
    } else {
        tracing::info!("Case already assigned to another agent");
    }
    Ok(row)
}
