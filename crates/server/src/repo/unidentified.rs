use shared_types::{AppError, UnidentifiedPerson};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// All unidentified persons, most recently found first.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<UnidentifiedPerson>, AppError> {
    sqlx::query_as::<_, UnidentifiedPerson>(
        r#"
        SELECT tracking_number, description, found_location, date_found, gender, current_status
        FROM unidentified_persons
        ORDER BY date_found DESC NULLS LAST, tracking_number
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
