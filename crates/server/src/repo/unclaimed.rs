use shared_types::{AppError, UnclaimedPerson};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// All unclaimed persons, most recent death first.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<UnclaimedPerson>, AppError> {
    sqlx::query_as::<_, UnclaimedPerson>(
        r#"
        SELECT tracking_number, date_of_death, age, legal_last_name, legal_first_name,
               gender, current_status, found_location
        FROM unclaimed_persons
        ORDER BY date_of_death DESC NULLS LAST, tracking_number
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
