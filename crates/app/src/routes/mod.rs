//! Page routes and the full application router.

pub mod assets;
pub mod auth;
pub mod cases;
pub mod dashboard;
pub mod lead;
pub mod public;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use server::auth::gate::auth_gate;
use server::auth::middleware::session_middleware;
use server::auth::session::SessionClaims;
use server::db::AppState;
use server::store::AuthService;
use server::telemetry::OtelTraceLayer;
use shared_types::{FeatureFlags, UserRole};
use shared_ui::NavVariant;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Navigation for the visitor behind `session`. Signed-in users whose
/// profile cannot be read get the reporter bar.
pub async fn nav_for(auth: &dyn AuthService, session: Option<&SessionClaims>) -> NavVariant {
    let Some(claims) = session else {
        return NavVariant::Public;
    };
    match auth.find_profile(claims.user_id()).await {
        Ok(Some(profile)) if profile.role() == UserRole::Agent => NavVariant::Agent,
        Ok(_) => NavVariant::Reporter,
        Err(e) => {
            tracing::warn!(user_id = %claims.sub, error = %e, "Profile lookup for navigation failed");
            NavVariant::Reporter
        }
    }
}

/// HTML pages, static assets and stored photos.
pub fn page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/unidentified", get(public::unidentified))
        .route("/unclaimed", get(public::unclaimed))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/register", get(auth::register_page).post(auth::register_submit))
        .route(
            "/forgot-password",
            get(auth::forgot_page).post(auth::forgot_submit),
        )
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::index))
        .route(
            "/dashboard/new-report",
            get(dashboard::new_report_page).post(dashboard::new_report_submit),
        )
        .route("/dashboard/missing", get(dashboard::missing))
        .route("/dashboard/unidentified", get(dashboard::unidentified))
        .route("/dashboard/unclaimed", get(dashboard::unclaimed))
        .route("/lead", get(lead::index))
        .route("/lead/all-cases", get(lead::all_cases))
        .route("/lead/unauthorized", get(lead::unauthorized))
        .route("/lead/cases/{case_number}/status", post(lead::update_status))
        .route("/lead/cases/{case_number}/take", post(lead::take))
        .route("/cases/{case_number}", get(cases::detail))
        .route("/static/app.css", get(assets::stylesheet))
        .route("/static/table.js", get(assets::table_script))
        .route("/photos/{key}", get(assets::photo))
}

/// The complete application: pages, JSON API and docs behind the session
/// middleware and page gate.
///
/// Layer order, outermost first: request id, HTTP tracing, body limit,
/// session, OTLP span (when enabled), gate.
pub fn build_router(state: AppState, features: &FeatureFlags) -> Router {
    let max_body = state.settings.max_upload_bytes;

    let mut router = page_router()
        .merge(server::rest::api_router())
        .fallback(public::not_found)
        .layer(from_fn_with_state(state.clone(), auth_gate));

    if features.telemetry {
        router = router.layer(OtelTraceLayer);
    }

    let router = router
        .layer(from_fn_with_state(state.clone(), session_middleware))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state);

    server::openapi::with_docs(router)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
