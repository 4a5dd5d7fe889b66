use chrono::NaiveDate;
use server::db::{create_pool, run_migrations};
use server::store::PgStore;
use shared_types::NewMissingPerson;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// URL of the `_test` database, created and migrated on first use.
static TEST_DB_URL: OnceCell<Option<String>> = OnceCell::const_new();

/// Derive `<name>_test` from `DATABASE_URL` and create it if needed.
async fn prepare_test_db() -> Option<String> {
    let _ = dotenvy::dotenv();
    let original_url = std::env::var("DATABASE_URL").ok()?;

    let (base_url, db_name) = original_url
        .rsplit_once('/')
        .expect("DATABASE_URL must contain a database name");
    let test_db_name = format!("{}_test", db_name);
    let test_url = format!("{}/{}", base_url, test_db_name);

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&format!("{}/postgres", base_url))
        .await
        .expect("Failed to connect to postgres admin database");

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&test_db_name)
            .fetch_one(&admin_pool)
            .await
            .expect("Failed to check for test database");

    if !exists {
        sqlx::query(&format!("CREATE DATABASE \"{}\"", test_db_name))
            .execute(&admin_pool)
            .await
            .expect("Failed to create test database");
    }
    admin_pool.close().await;

    let pool = create_pool(&test_url, 2).expect("test pool");
    run_migrations(&pool).await.expect("migrations");
    pool.close().await;

    Some(test_url)
}

/// A store on the test database, or `None` when `DATABASE_URL` is unset and
/// the Postgres tests should be skipped.
///
/// Each test gets its own pool; sqlx pools do not cross tokio runtimes.
pub async fn test_store() -> Option<PgStore> {
    let url = TEST_DB_URL.get_or_init(prepare_test_db).await.clone();
    match url {
        Some(url) => Some(PgStore::new(create_pool(&url, 4).expect("test pool"))),
        None => {
            eprintln!("DATABASE_URL not set; skipping Postgres test");
            None
        }
    }
}

/// Email that no other test run has used.
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}.{}@findme.test", Uuid::new_v4().simple())
}

#[allow(dead_code)]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}_{}", &Uuid::new_v4().simple().to_string()[..12])
}

#[allow(dead_code)]
pub fn new_case(reporter_id: Uuid, first: &str) -> NewMissingPerson {
    NewMissingPerson {
        legal_first_name: first.to_string(),
        legal_last_name: "Kariuki".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1995, 7, 3).unwrap(),
        age: 29,
        gender: "Male".to_string(),
        town_location: "Eldoret".to_string(),
        date_of_last_contact: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
        reporter_id,
        physical_description: Some("Tall, short hair".to_string()),
        last_seen_wearing: None,
        medical_conditions: None,
        emergency_contacts: None,
        possible_locations: None,
        circumstances: None,
        reporter_name: None,
        reporter_contact: None,
        photo_url: None,
    }
}
