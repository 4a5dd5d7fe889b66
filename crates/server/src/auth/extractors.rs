use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use shared_types::{AppError, Profile, UserRole};

use super::session::SessionClaims;
use super::LOGIN_PATH;
use crate::db::AppState;

/// Extractor that optionally extracts the session. Never fails.
pub struct MaybeSession(pub Option<SessionClaims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(parts.extensions.get::<SessionClaims>().cloned()))
    }
}

/// Extractor that requires a session whose profile has the agent role.
/// Returns 401 if unauthenticated, 403 if the profile is not an agent.
pub struct AgentRequired {
    pub claims: SessionClaims,
    pub profile: Profile,
}

impl FromRequestParts<AppState> for AgentRequired {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let profile = state
            .auth
            .find_profile(claims.user_id())
            .await?
            .ok_or_else(|| AppError::forbidden("agent role required"))?;

        if !profile.role().satisfies(&UserRole::Agent) {
            return Err(AppError::forbidden("agent role required"));
        }

        Ok(AgentRequired { claims, profile })
    }
}

/// Page extractor for handlers behind the gate. A missing session sends the
/// visitor to the login page instead of an error body.
pub struct SignedIn(pub SessionClaims);

impl<S: Send + Sync> FromRequestParts<S> for SignedIn {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(SignedIn)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// Page extractor for agent handlers. Reads the profile the gate stored.
pub struct SignedInAgent {
    pub claims: SessionClaims,
    pub profile: Profile,
}

impl<S: Send + Sync> FromRequestParts<S> for SignedInAgent {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .ok_or_else(|| Redirect::to(LOGIN_PATH))?;
        let profile = parts
            .extensions
            .get::<Profile>()
            .cloned()
            .filter(|p| p.role() == UserRole::Agent)
            .ok_or_else(|| Redirect::to(super::UNAUTHORIZED_PATH))?;
        Ok(SignedInAgent { claims, profile })
    }
}
