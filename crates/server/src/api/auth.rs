use shared_types::{AppError, AuthUser, MessageResponse, RegisterForm, UserRole};

use crate::error_convert::ValidateRequest;
use crate::store::AuthService;

/// Message shown when the profile row behind a valid login cannot be read.
pub const ROLE_LOOKUP_FAILED: &str = "Unable to fetch user role";

/// Neutral response to a password-reset request.
pub const RESET_REQUESTED: &str =
    "If an account exists for that email, password reset instructions have been sent.";

/// A user who just proved their identity, with the role that decides where
/// they land.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedInUser {
    pub user: AuthUser,
    pub role: UserRole,
}

impl SignedInUser {
    pub fn landing_path(&self) -> &'static str {
        self.role.landing_path()
    }
}

async fn resolve_role(auth: &dyn AuthService, user: AuthUser) -> Result<SignedInUser, AppError> {
    match auth.find_profile(user.id).await {
        Ok(Some(profile)) => Ok(SignedInUser {
            role: profile.role(),
            user,
        }),
        Ok(None) => {
            tracing::error!(user_id = %user.id, "Authenticated user has no profile");
            Err(AppError::internal(ROLE_LOOKUP_FAILED))
        }
        Err(e) => {
            tracing::error!(user_id = %user.id, error = %e, "Profile lookup failed");
            Err(AppError::internal(ROLE_LOOKUP_FAILED))
        }
    }
}

/// Check credentials, then read the profile role.
#[tracing::instrument(skip(auth, password))]
pub async fn login(
    auth: &dyn AuthService,
    email: &str,
    password: &str,
) -> Result<SignedInUser, AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::unauthorized("Email and password are required"));
    }

    let user = auth.sign_in(email, password).await.map_err(|e| {
        tracing::info!(error = %e, "Sign-in rejected");
        e
    })?;

    let signed_in = resolve_role(auth, user).await?;
    tracing::info!(user_id = %signed_in.user.id, role = signed_in.role.as_str(), "Signed in");
    Ok(signed_in)
}

/// Validate the form and create a `public` account.
#[tracing::instrument(skip(auth, form), fields(email = %form.email))]
pub async fn register(auth: &dyn AuthService, form: RegisterForm) -> Result<SignedInUser, AppError> {
    form.validate_request()?;

    let user = auth
        .sign_up(form.username.trim(), form.email.trim(), &form.password)
        .await?;
    tracing::info!(user_id = %user.id, "Account created");

    resolve_role(auth, user).await
}

/// Accept a reset request without revealing whether the account exists.
/// Delivery of reset mail is not wired up.
pub fn forgot_password(email: &str) -> MessageResponse {
    if !email.trim().is_empty() {
        tracing::info!("Password reset requested");
    }
    MessageResponse {
        message: RESET_REQUESTED.to_string(),
    }
}
