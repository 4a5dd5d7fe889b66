//! Create an agent account. Agents cannot register through the site.
//!
//! Usage: `create_agent <username> <email> <password>` with `DATABASE_URL` set.

use server::auth::password::hash_password;
use server::config::Settings;
use server::db::{create_pool, run_migrations};
use server::repo::profile;
use shared_types::{AppError, UserRole};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    server::telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [username, email, password] = args.as_slice() else {
        return Err(AppError::bad_request(
            "usage: create_agent <username> <email> <password>",
        ));
    };
    if password.len() < 8 {
        return Err(AppError::bad_request("Password must be at least 8 characters"));
    }

    let settings = Settings::from_env()?;
    let database_url = settings
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::internal("DATABASE_URL must be set"))?;
    let pool = create_pool(database_url, 1)?;
    run_migrations(&pool).await?;

    let hash = hash_password(password)?;
    let created = profile::create(&pool, username, email, &hash).await?;
    let agent = profile::set_role(&pool, created.id, UserRole::Agent)
        .await?
        .ok_or_else(|| AppError::internal("Profile vanished after insert"))?;

    tracing::info!(user_id = %agent.id, email = %agent.email, "Agent account created");
    println!("{}", agent.id);
    Ok(())
}
