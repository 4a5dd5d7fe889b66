use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use crate::auth::session::SessionKeys;
use crate::config::Settings;
use crate::memory::MemoryBackend;
use crate::storage::{MemoryObjectStore, ObjectStore};
use crate::store::{AuthService, CaseStore};

/// Shared application state passed to Axum handlers via `State`.
///
/// Every backend is injected as a trait object so handlers never reach for a
/// process-wide client. Derives `FromRef` so handlers can extract a single
/// dependency, e.g. `State<Arc<dyn CaseStore>>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub cases: Arc<dyn CaseStore>,
    pub auth: Arc<dyn AuthService>,
    pub objects: Arc<dyn ObjectStore>,
    pub sessions: SessionKeys,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        cases: Arc<dyn CaseStore>,
        auth: Arc<dyn AuthService>,
        objects: Arc<dyn ObjectStore>,
        settings: Settings,
    ) -> Self {
        Self {
            cases,
            auth,
            objects,
            sessions: SessionKeys::from_secret(&settings.session_secret),
            settings: Arc::new(settings),
        }
    }

    /// State backed entirely by memory. Returns the concrete backends so
    /// callers can seed data or inject failures.
    pub fn in_memory(settings: Settings) -> (Self, Arc<MemoryBackend>, Arc<MemoryObjectStore>) {
        let backend = Arc::new(MemoryBackend::new());
        let objects = Arc::new(MemoryObjectStore::new("/photos"));
        let state = Self::new(backend.clone(), backend.clone(), objects.clone(), settings);
        (state, backend, objects)
    }
}

/// Create a new database connection pool.
/// Uses `connect_lazy` so no connections open until the first query.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<Pool<Postgres>, AppError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(database_url)
        .map_err(|e| AppError::internal(format!("Invalid DATABASE_URL: {e}")))
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to run database migrations: {e}")))
}
