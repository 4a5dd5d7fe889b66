use axum::Router;
use shared_types::{
    AppError, AppErrorKind, CaseStatus, MessageResponse, MissingPerson, MissingPersonSummary,
    UnclaimedPerson, UnidentifiedPerson, UpdateCaseStatusRequest,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health::{self, HealthResponse};
use crate::rest;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::list_missing,
        rest::list_unidentified,
        rest::list_unclaimed,
        rest::get_case,
        rest::update_status,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse, HealthResponse,
        MissingPerson, MissingPersonSummary, CaseStatus, UpdateCaseStatusRequest,
        UnidentifiedPerson, UnclaimedPerson,
    )),
    tags(
        (name = "cases", description = "Missing, unidentified and unclaimed person records"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "FindMe API",
        description = "Missing persons reporting and case management API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Serve the API reference at `/docs`. Merged after `with_state`.
pub fn with_docs(router: Router) -> Router {
    router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
