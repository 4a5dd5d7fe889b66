use shared_types::AppError;

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation (error code 23505)
            if db_err.code().as_deref() == Some("23505") {
                let detail = db_err.message();
                let friendly = if detail.contains("email") {
                    "An account with this email already exists"
                } else if detail.contains("username") {
                    "This username is already taken"
                } else if detail.contains("case_number") {
                    "A case with this number already exists"
                } else {
                    "A record with this value already exists"
                };
                return AppError::conflict(friendly);
            }
            // CHECK constraint violation (23514), e.g. an unknown case status
            if db_err.code().as_deref() == Some("23514") {
                return AppError::bad_request(db_err.message().to_string());
            }
            AppError::database(err.to_string())
        }
        _ => AppError::database(err.to_string()),
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
