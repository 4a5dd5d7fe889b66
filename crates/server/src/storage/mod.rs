use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client};
use chrono::Utc;
use image::ImageFormat;
use uuid::Uuid;

use crate::s3::S3Settings;

/// Largest photo accepted with a report.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// File extension for an accepted photo content type. Parameters such as
/// `; charset=binary` are ignored.
pub fn photo_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// File extension for the image format the bytes actually hold.
pub fn sniff_photo_extension(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::Png => Some("png"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Gif => Some("gif"),
        _ => None,
    }
}

/// Content type a photo is stored and served with.
pub fn photo_content_type(extension: &str) -> &'static str {
    match extension {
        "jpg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Object key for a report photo: `<unix-millis>-<uuid>.<ext>`.
pub fn photo_key(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        extension
    )
}

/// A stored object as returned by `get`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub content_type: String,
    pub body: Vec<u8>,
}

// ── Trait ────────────────────────────────────────────────────────────

/// Object storage for report photos.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under `key`.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String>;

    /// Publicly reachable URL for an uploaded object.
    fn public_url(&self, key: &str) -> Result<String, String>;

    /// Download an object. `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, String>;
}

// ── S3 implementation ───────────────────────────────────────────────

/// S3-compatible object store backed by Tigris/MinIO. The bucket is
/// public-read so photo URLs work straight from the browser.
pub struct S3ObjectStore {
    client: Client,
    settings: S3Settings,
}

impl S3ObjectStore {
    pub fn new(settings: S3Settings) -> Self {
        Self {
            client: settings.client(),
            settings,
        }
    }

    /// Create the photos bucket if it doesn't already exist, and set a
    /// public-read policy.
    pub async fn ensure_bucket(&self) {
        let bucket = &self.settings.bucket;
        let exists = self.client.head_bucket().bucket(bucket).send().await.is_ok();

        if !exists {
            tracing::info!("Creating photos bucket '{}'...", bucket);
            if let Err(e) = self.client.create_bucket().bucket(bucket).send().await {
                tracing::warn!("Failed to create photos bucket '{}': {}", bucket, e);
                return;
            }
            tracing::info!("Photos bucket '{}' created", bucket);
        }

        // Tigris manages public access outside of bucket policies.
        if !self.settings.is_tigris() {
            match self
                .client
                .put_bucket_policy()
                .bucket(bucket)
                .policy(self.settings.public_read_policy())
                .send()
                .await
            {
                Ok(_) => tracing::info!("Public-read policy applied to '{}'", bucket),
                Err(e) => tracing::warn!("Failed to set bucket policy on '{}': {}", bucket, e),
            }
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!("S3 PutObject failed for key '{}': {:?}", key, svc);
                format!("S3 upload failed: {}", svc)
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> Result<String, String> {
        Ok(self.settings.public_url(key))
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, String> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let svc = e.into_service_error();
                if svc.is_no_such_key() {
                    return Ok(None);
                }
                tracing::error!("S3 GetObject failed for key '{}': {:?}", key, svc);
                return Err(format!("S3 download failed: {}", svc));
            }
        };

        let content_type = resp
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = resp
            .body
            .collect()
            .await
            .map(|data| data.into_bytes().to_vec())
            .map_err(|e| format!("Failed to read S3 response body: {}", e))?;

        Ok(Some(StoredObject { content_type, body }))
    }
}

// ── In-memory implementation ────────────────────────────────────────

/// Process-local object store used when the `s3` feature is off and in tests.
/// Objects are served back by the app under `base_url`.
pub struct MemoryObjectStore {
    base_url: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_uploads: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(HashMap::new()),
            fail_uploads: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `put` fail.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn keys(&self) -> Vec<String> {
        match self.objects.lock() {
            Ok(objects) => objects.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err("object store unavailable".to_string());
        }
        let mut objects = self.objects.lock().map_err(|_| "object store poisoned".to_string())?;
        objects.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                body,
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> Result<String, String> {
        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, String> {
        let objects = self.objects.lock().map_err(|_| "object store poisoned".to_string())?;
        Ok(objects.get(key).cloned())
    }
}
