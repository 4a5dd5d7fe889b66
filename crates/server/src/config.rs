use shared_types::{AppConfig, AppError};
use std::path::Path;

/// Path to the config file, relative to the project root.
pub const CONFIG_PATH: &str = "config.toml";

/// Secret used to sign sessions when `SESSION_SECRET` is unset outside production.
const DEV_SESSION_SECRET: &str = "findme-development-session-secret";

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Postgres connection string. `None` runs the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub session_secret: String,
    pub bind_addr: String,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
    /// Request body limit for multipart report submissions.
    pub max_upload_bytes: usize,
    pub photos_bucket: String,
    pub deploy_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: 10,
            session_secret: DEV_SESSION_SECRET.to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            cookie_secure: false,
            max_upload_bytes: 10 * 1024 * 1024,
            photos_bucket: "missing-persons-photos".to_string(),
            deploy_env: "development".to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();

        let deploy_env = get("DEPLOY_ENV").unwrap_or(defaults.deploy_env);
        let session_secret = match get("SESSION_SECRET") {
            Some(secret) => secret,
            None if deploy_env == "development" => {
                tracing::warn!("SESSION_SECRET not set; using the development secret");
                defaults.session_secret
            }
            None => {
                return Err(AppError::internal(format!(
                    "SESSION_SECRET must be set when DEPLOY_ENV is {deploy_env}"
                )))
            }
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(
                get("DATABASE_MAX_CONNECTIONS"),
                defaults.database_max_connections,
            ),
            session_secret,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cookie_secure: parse_or(get("COOKIE_SECURE"), defaults.cookie_secure),
            max_upload_bytes: parse_or(get("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes),
            photos_bucket: get("PHOTOS_BUCKET").unwrap_or(defaults.photos_bucket),
            deploy_env,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Read `config.toml` and parse the feature flags.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_app_config(path: impl AsRef<Path>) -> AppConfig {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                tracing::info!(features = ?config.features, "Loaded {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse {}; all features off", path.display());
                AppConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "{} not found; all features off", path.display());
            AppConfig::default()
        }
    }
}
