use shared_types::{AppError, Profile, UserRole};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Sign-in material for one account.
#[derive(Debug, sqlx::FromRow)]
pub struct Credentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Insert a profile with the `public` role.
pub async fn create(
    pool: &Pool<Postgres>,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Profile, AppError> {
    sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (id, username, email, password_hash, role)
        VALUES ($1, $2, lower($3), $4, $5)
        RETURNING id, username, email, role
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email.trim())
    .bind(password_hash)
    .bind(UserRole::Public.as_str())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Look up credentials by email, case-insensitively.
pub async fn find_credentials(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<Credentials>, AppError> {
    sqlx::query_as::<_, Credentials>(
        "SELECT id, email, password_hash FROM profiles WHERE email = lower($1)",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Profile>, AppError> {
    sqlx::query_as::<_, Profile>("SELECT id, username, email, role FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Change the role of an existing profile. Returns `None` when no row matched.
pub async fn set_role(
    pool: &Pool<Postgres>,
    id: Uuid,
    role: UserRole,
) -> Result<Option<Profile>, AppError> {
    sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET role = $2 WHERE id = $1 RETURNING id, username, email, role",
    )
    .bind(id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
