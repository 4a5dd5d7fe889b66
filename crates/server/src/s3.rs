use aws_sdk_s3::{
    config::{Credentials, Region},
    Client,
};
use shared_types::AppError;

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
        .filter(|v| !v.is_empty())
}

/// Connection settings for an S3-compatible bucket.
///
/// Supports both Fly/Tigris (`AWS_*`) and local MinIO (`S3_*`) naming:
///   - `AWS_ENDPOINT_URL_S3` / `S3_ENDPOINT`
///   - `AWS_ACCESS_KEY_ID`   / `S3_ACCESS_KEY`
///   - `AWS_SECRET_ACCESS_KEY` / `S3_SECRET_KEY`
///   - `AWS_REGION`          / `S3_REGION`
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
}

impl S3Settings {
    pub fn from_env(bucket: &str) -> Result<Self, AppError> {
        let required = |primary: &str, fallback: &str| {
            env_or(primary, fallback).ok_or_else(|| {
                AppError::internal(format!("{primary} or {fallback} must be set"))
            })
        };

        Ok(Self {
            endpoint: required("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")?,
            access_key: required("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")?,
            secret_key: required("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")?,
            region: env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            bucket: bucket.to_string(),
        })
    }

    /// Build an S3-compatible client.
    pub fn client(&self) -> Client {
        let creds = Credentials::new(&self.access_key, &self.secret_key, None, None, "env");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&self.endpoint)
            .region(Region::new(self.region.clone()))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Client::from_conf(config)
    }

    /// Tigris is addressed virtual-hosted style and manages public access itself.
    pub fn is_tigris(&self) -> bool {
        self.endpoint.contains("tigris")
    }

    /// Public URL of an object.
    ///
    /// Tigris: `https://{bucket}.fly.storage.tigris.dev/{key}`
    /// MinIO / generic S3: `http://localhost:9000/{bucket}/{key}`
    pub fn public_url(&self, key: &str) -> String {
        if self.is_tigris() {
            let host = self
                .endpoint
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            format!("https://{}.{}/{}", self.bucket, host, key)
        } else {
            format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), self.bucket, key)
        }
    }

    /// Bucket policy granting anonymous read on every object.
    pub fn public_read_policy(&self) -> String {
        format!(
            r#"{{"Version":"2012-10-17","Statement":[{{"Effect":"Allow","Principal":"*","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::{}/*"]}}]}}"#,
            self.bucket
        )
    }
}
