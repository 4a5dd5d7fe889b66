use std::sync::Arc;

use server::config::{load_app_config, Settings, CONFIG_PATH};
use server::db::{create_pool, run_migrations, AppState};
use server::memory::MemoryBackend;
use server::s3::S3Settings;
use server::storage::{MemoryObjectStore, ObjectStore, S3ObjectStore};
use server::store::{AuthService, CaseStore, PgStore};
use shared_types::AppError;

/// Photos kept in memory are served back under this prefix.
const MEMORY_PHOTOS_URL: &str = "/photos";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    server::telemetry::init_tracing();

    let features = load_app_config(CONFIG_PATH).features;
    if features.telemetry {
        server::telemetry::init_telemetry();
    }
    server::health::record_start_time();

    let settings = Settings::from_env()?;

    let (cases, auth): (Arc<dyn CaseStore>, Arc<dyn AuthService>) =
        match settings.database_url.as_deref() {
            Some(url) => {
                let pool = create_pool(url, settings.database_max_connections)?;
                run_migrations(&pool).await?;
                let store = Arc::new(PgStore::new(pool));
                (store.clone(), store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using the in-memory store, data is lost on restart");
                let backend = Arc::new(MemoryBackend::new());
                (backend.clone(), backend)
            }
        };

    let objects: Arc<dyn ObjectStore> = if features.s3 {
        let store = S3ObjectStore::new(S3Settings::from_env(&settings.photos_bucket)?);
        store.ensure_bucket().await;
        Arc::new(store)
    } else {
        tracing::info!("s3 feature off; photos are kept in memory");
        Arc::new(MemoryObjectStore::new(MEMORY_PHOTOS_URL))
    };

    let bind_addr = settings.bind_addr.clone();
    let state = AppState::new(cases, auth, objects, settings);
    let router = app::build_router(state, &features);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;
    tracing::info!(addr = %bind_addr, "FindMe listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
