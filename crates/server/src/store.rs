//! Backend seams. Handlers only see these traits; the Postgres store and
//! the in-memory store both implement them.

use async_trait::async_trait;
use shared_types::{
    AppError, AuthUser, CaseStatus, ListScope, MissingPerson, MissingPersonSummary,
    NewMissingPerson, Profile, UnclaimedPerson, UnidentifiedPerson,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::password::{self, StoredCredentials};
use crate::repo;

/// Case records: missing persons (read/write) plus the two read-only registries.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Insert a report. The store assigns the case number and `pending` status.
    async fn insert_missing(&self, record: NewMissingPerson) -> Result<MissingPerson, AppError>;

    async fn find_missing(&self, case_number: &str) -> Result<Option<MissingPerson>, AppError>;

    /// Newest first.
    async fn list_missing(&self, scope: ListScope) -> Result<Vec<MissingPersonSummary>, AppError>;

    /// Overwrite the status unconditionally. `None` when no row matched.
    async fn update_missing_status(
        &self,
        case_number: &str,
        status: CaseStatus,
    ) -> Result<Option<MissingPerson>, AppError>;

    /// Assign `officer_id` if the case has no officer yet, moving a pending
    /// case to active. Returns the row as it stands afterwards, assigned or
    /// not; `None` when the case does not exist.
    async fn assign_officer(
        &self,
        case_number: &str,
        officer_id: Uuid,
    ) -> Result<Option<MissingPerson>, AppError>;

    async fn list_unidentified(&self) -> Result<Vec<UnidentifiedPerson>, AppError>;

    async fn list_unclaimed(&self) -> Result<Vec<UnclaimedPerson>, AppError>;

    /// Cheap liveness probe for `/health`.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Accounts and profiles.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account with the `public` role.
    async fn sign_up(&self, username: &str, email: &str, password: &str)
        -> Result<AuthUser, AppError>;

    /// Check credentials. Unknown email and wrong password fail the same way.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;
}

/// Message returned for any failed sign-in.
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Postgres-backed implementation of both seams.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl CaseStore for PgStore {
    async fn insert_missing(&self, record: NewMissingPerson) -> Result<MissingPerson, AppError> {
        repo::missing::create(&self.pool, record).await
    }

    async fn find_missing(&self, case_number: &str) -> Result<Option<MissingPerson>, AppError> {
        repo::missing::find_by_case_number(&self.pool, case_number).await
    }

    async fn list_missing(&self, scope: ListScope) -> Result<Vec<MissingPersonSummary>, AppError> {
        repo::missing::list(&self.pool, scope).await
    }

    async fn update_missing_status(
        &self,
        case_number: &str,
        status: CaseStatus,
    ) -> Result<Option<MissingPerson>, AppError> {
        repo::missing::update_status(&self.pool, case_number, status).await
    }

    async fn assign_officer(
        &self,
        case_number: &str,
        officer_id: Uuid,
    ) -> Result<Option<MissingPerson>, AppError> {
        repo::missing::assign_officer(&self.pool, case_number, officer_id).await
    }

    async fn list_unidentified(&self) -> Result<Vec<UnidentifiedPerson>, AppError> {
        repo::unidentified::list(&self.pool).await
    }

    async fn list_unclaimed(&self) -> Result<Vec<UnclaimedPerson>, AppError> {
        repo::unclaimed::list(&self.pool).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        repo::ping(&self.pool).await
    }
}

#[async_trait]
impl AuthService for PgStore {
    async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        let hash = password::hash_password_blocking(password.to_string()).await?;
        let profile = repo::profile::create(&self.pool, username, email, &hash).await?;
        Ok(AuthUser {
            id: profile.id,
            email: profile.email,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let found = repo::profile::find_credentials(&self.pool, email)
            .await?
            .map(|c| StoredCredentials {
                id: c.id,
                email: c.email,
                password_hash: c.password_hash,
            });
        password::check_credentials(found, password.to_string()).await
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        repo::profile::find_by_id(&self.pool, user_id).await
    }
}
