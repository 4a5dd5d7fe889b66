use axum::{
    extract::{Path, State},
    Json,
};
use shared_types::{
    AppError, ListScope, MissingPerson, MissingPersonSummary, UnclaimedPerson,
    UnidentifiedPerson, UpdateCaseStatusRequest,
};
use std::sync::Arc;

use crate::auth::extractors::AgentRequired;
use crate::store::CaseStore;

/// List every missing-person case, newest first.
#[utoipa::path(
    get,
    path = "/api/cases/missing",
    responses(
        (status = 200, description = "Missing-person cases", body = Vec<MissingPersonSummary>),
        (status = 500, description = "Store error", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(cases))]
pub async fn list_missing(
    State(cases): State<Arc<dyn CaseStore>>,
) -> Result<Json<Vec<MissingPersonSummary>>, AppError> {
    cases.list_missing(ListScope::All).await.map(Json)
}

/// List unidentified persons.
#[utoipa::path(
    get,
    path = "/api/cases/unidentified",
    responses(
        (status = 200, description = "Unidentified persons", body = Vec<UnidentifiedPerson>),
        (status = 500, description = "Store error", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(cases))]
pub async fn list_unidentified(
    State(cases): State<Arc<dyn CaseStore>>,
) -> Result<Json<Vec<UnidentifiedPerson>>, AppError> {
    cases.list_unidentified().await.map(Json)
}

/// List unclaimed persons.
#[utoipa::path(
    get,
    path = "/api/cases/unclaimed",
    responses(
        (status = 200, description = "Unclaimed persons", body = Vec<UnclaimedPerson>),
        (status = 500, description = "Store error", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(cases))]
pub async fn list_unclaimed(
    State(cases): State<Arc<dyn CaseStore>>,
) -> Result<Json<Vec<UnclaimedPerson>>, AppError> {
    cases.list_unclaimed().await.map(Json)
}

/// Get one missing-person case by its case number.
#[utoipa::path(
    get,
    path = "/api/cases/{case_number}",
    params(
        ("case_number" = String, Path, description = "Case number, e.g. MSP-2025-00001")
    ),
    responses(
        (status = 200, description = "Case found", body = MissingPerson),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(cases))]
pub async fn get_case(
    State(cases): State<Arc<dyn CaseStore>>,
    Path(case_number): Path<String>,
) -> Result<Json<MissingPerson>, AppError> {
    let case = cases
        .find_missing(&case_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_number)))?;

    Ok(Json(case))
}

/// Overwrite the status of a case. Agents only.
#[utoipa::path(
    patch,
    path = "/api/cases/{case_number}/status",
    request_body = UpdateCaseStatusRequest,
    params(
        ("case_number" = String, Path, description = "Case number, e.g. MSP-2025-00001")
    ),
    responses(
        (status = 200, description = "Status updated", body = MissingPerson),
        (status = 400, description = "Invalid status", body = AppError),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Not an agent", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(cases, agent, body), fields(agent_id = %agent.claims.sub))]
pub async fn update_status(
    State(cases): State<Arc<dyn CaseStore>>,
    agent: AgentRequired,
    Path(case_number): Path<String>,
    Json(body): Json<UpdateCaseStatusRequest>,
) -> Result<Json<MissingPerson>, AppError> {
    crate::api::update_case_status(cases.as_ref(), &case_number, &body.status)
        .await
        .map(Json)
}
