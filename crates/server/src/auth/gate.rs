use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use shared_types::{Profile, UserRole};

use super::session::SessionClaims;
use super::{LOGIN_PATH, UNAUTHORIZED_PATH};
use crate::db::AppState;

/// Outcome of checking a page request against the protected path table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
}

/// Role a path requires, or `None` for public pages.
///
/// `/dashboard/*` needs any session; `/lead/*` needs an agent, except the
/// unauthorized notice itself.
pub fn required_role(path: &str) -> Option<UserRole> {
    let under = |prefix: &str| path == prefix || path.starts_with(&format!("{prefix}/"));

    if path == UNAUTHORIZED_PATH {
        None
    } else if under("/lead") {
        Some(UserRole::Agent)
    } else if under("/dashboard") {
        Some(UserRole::Public)
    } else {
        None
    }
}

/// Decide what to do with a protected request. `role` is the looked-up
/// profile role, `None` when no profile could be read.
pub fn decide(required: UserRole, signed_in: bool, role: Option<UserRole>) -> GateDecision {
    if !signed_in {
        return GateDecision::RedirectToLogin;
    }
    match required {
        UserRole::Public => GateDecision::Allow,
        UserRole::Agent => match role {
            Some(role) if role.satisfies(&UserRole::Agent) => GateDecision::Allow,
            _ => GateDecision::RedirectToUnauthorized,
        },
    }
}

/// Page gate. Runs inside `session_middleware`, so claims are already in
/// the request extensions when a valid cookie was sent.
///
/// For agent paths the profile is read once and stored in the extensions for
/// the handler.
pub async fn auth_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(required) = required_role(req.uri().path()) else {
        return next.run(req).await;
    };

    let claims = req.extensions().get::<SessionClaims>().cloned();
    let mut role = None;

    if let (UserRole::Agent, Some(claims)) = (required, &claims) {
        match state.auth.find_profile(claims.user_id()).await {
            Ok(Some(profile)) => {
                role = Some(profile.role());
                req.extensions_mut().insert::<Profile>(profile);
            }
            Ok(None) => tracing::warn!(user_id = %claims.sub, "Session without a profile"),
            Err(e) => tracing::error!(user_id = %claims.sub, error = %e, "Profile lookup failed"),
        }
    }

    match decide(required, claims.is_some(), role) {
        GateDecision::Allow => next.run(req).await,
        GateDecision::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
        GateDecision::RedirectToUnauthorized => {
            tracing::info!(path = %req.uri().path(), "Non-agent turned away from agent page");
            Redirect::to(UNAUTHORIZED_PATH).into_response()
        }
    }
}
