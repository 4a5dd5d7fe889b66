pub mod cases;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::db::AppState;

pub use cases::*;

/// Build the JSON API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(crate::health::health_check))
        .route("/api/cases/missing", get(cases::list_missing))
        .route("/api/cases/unidentified", get(cases::list_unidentified))
        .route("/api/cases/unclaimed", get(cases::list_unclaimed))
        .route("/api/cases/{case_number}", get(cases::get_case))
        .route("/api/cases/{case_number}/status", patch(cases::update_status))
}
