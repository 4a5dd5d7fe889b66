pub mod missing;
pub mod profile;
pub mod unclaimed;
pub mod unidentified;

use shared_types::AppError;
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Round-trip a trivial query.
pub async fn ping(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
        .map_err(SqlxErrorExt::into_app_error)
}
