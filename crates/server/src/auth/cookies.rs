use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};
use shared_types::AppError;

use super::session::SESSION_TTL_DAYS;

/// Name of the cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "dashboard_session";

fn to_header(cookie: Cookie<'_>) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|_| AppError::internal("Failed to build session cookie"))
}

/// Build a Set-Cookie header value for the session token.
pub fn build_session_cookie(token: &str, secure: bool) -> Result<HeaderValue, AppError> {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::days(SESSION_TTL_DAYS))
        .secure(secure)
        .build();
    to_header(cookie)
}

/// Build a Set-Cookie header that clears the session cookie.
pub fn build_clear_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .secure(secure)
        .build();
    to_header(cookie)
}

/// Extract the session token from the Cookie header.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, SESSION_COOKIE).filter(|v| !v.is_empty())
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}
