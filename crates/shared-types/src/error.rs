use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    DatabaseError,
    Unauthorized,
    Forbidden,
    UploadFailed,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::DatabaseError => write!(f, "DatabaseError"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::UploadFailed => write!(f, "UploadFailed"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error shared by the page handlers and the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn with_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::DatabaseError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Forbidden, message)
    }

    /// Photo could not be stored or its public URL could not be resolved.
    pub fn upload_failed(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::UploadFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::InternalError, message)
    }

    /// Message safe to show in a rendered page. Store errors collapse to a
    /// generic string; the driver detail only goes to the log.
    pub fn user_message(&self) -> String {
        match self.kind {
            AppErrorKind::DatabaseError => "Something went wrong. Please try again.".to_string(),
            _ => self.message.clone(),
        }
    }

    pub fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::DatabaseError => 500,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::Forbidden => 403,
            AppErrorKind::UploadFailed => 500,
            AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Please fill in all required fields", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
