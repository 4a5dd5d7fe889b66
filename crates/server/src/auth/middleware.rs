use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies;
use crate::db::AppState;

/// Permissive session middleware.
///
/// Verifies the session cookie and inserts `SessionClaims` into the request
/// extensions. A cookie that fails verification (tampered, expired, signed
/// with a rotated secret) is cleared on the way out.
///
/// Does NOT reject unauthenticated requests; the page gate and the API
/// extractors decide authorization.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let mut stale_cookie = false;

    if let Some(token) = cookies::extract_session_token(req.headers()) {
        match state.sessions.verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Discarding invalid session cookie");
                stale_cookie = true;
            }
        }
    }

    let mut response = next.run(req).await;

    // A handler that issued or cleared the cookie itself wins.
    if stale_cookie && !response.headers().contains_key(header::SET_COOKIE) {
        if let Ok(clear) = cookies::build_clear_cookie(state.settings.cookie_secure) {
            response.headers_mut().append(header::SET_COOKIE, clear);
        }
    }

    response
}
