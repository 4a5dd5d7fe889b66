use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use shared_types::{AppError, AuthUser};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::store::INVALID_CREDENTIALS;

/// Hash a password into a PHC string for the `profiles.password_hash` column.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Unable to create account")
        })
}

/// Check a password against a stored hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

/// Hash of a password no account uses. Checked when a sign-in names an
/// unknown email so that case costs the same Argon2 work as a wrong password.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("no-such-account-placeholder").ok())
        .as_deref()
}

/// `hash_password` on the blocking pool.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Stored sign-in material for the account an email resolved to.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Check a password against the account found for an email, if any.
///
/// Runs one Argon2 verification on the blocking pool either way; an unknown
/// email is verified against a dummy hash and then rejected with the same
/// message as a wrong password.
pub async fn check_credentials(
    found: Option<StoredCredentials>,
    password: String,
) -> Result<AuthUser, AppError> {
    tokio::task::spawn_blocking(move || match found {
        Some(creds) if verify_password(&password, &creds.password_hash) => Ok(AuthUser {
            id: creds.id,
            email: creds.email,
        }),
        Some(_) => Err(AppError::unauthorized(INVALID_CREDENTIALS)),
        None => {
            if let Some(hash) = dummy_hash() {
                let _ = verify_password(&password, hash);
            }
            Err(AppError::unauthorized(INVALID_CREDENTIALS))
        }
    })
    .await
    .map_err(|e| AppError::internal(format!("Password check task failed: {e}")))?
}
