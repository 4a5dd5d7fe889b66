use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Login form. The `username` input carries the email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RegisterForm {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 3, message = "Username must be at least 3 characters"))
    )]
    pub username: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Enter a valid email address"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(must_match(other = "password", message = "Passwords do not match"))
    )]
    pub confirm_password: String,
}

/// Forgot-password form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ForgotPasswordForm {
    pub email: String,
}

/// Status dropdown posted by the agent pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusForm {
    pub status: String,
    /// Page to return to after the update.
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}
