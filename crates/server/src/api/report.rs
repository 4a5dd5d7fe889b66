use std::collections::HashMap;

use chrono::NaiveDate;
use shared_types::{AppError, MissingPerson, NewReportForm};
use uuid::Uuid;

use crate::error_convert::ValidateRequest;
use crate::storage::{
    photo_content_type, photo_extension, photo_key, sniff_photo_extension, ObjectStore,
    MAX_PHOTO_BYTES,
};
use crate::store::CaseStore;

/// A photo file taken from the report form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

fn photo_error(message: &str) -> AppError {
    let mut fields = HashMap::new();
    fields.insert("photo".to_string(), message.to_string());
    AppError::validation(message, fields)
}

/// Check type and size. The declared content type must agree with the
/// bytes. Returns the file extension to store under.
pub fn check_photo(photo: &PhotoUpload) -> Result<&'static str, AppError> {
    let ext = photo_extension(&photo.content_type)
        .filter(|ext| sniff_photo_extension(&photo.bytes) == Some(*ext))
        .ok_or_else(|| photo_error("Photo must be a JPEG, PNG, WebP or GIF image"))?;
    if photo.bytes.len() > MAX_PHOTO_BYTES {
        return Err(photo_error("Photo must be 5 MB or smaller"));
    }
    Ok(ext)
}

/// Upload the photo and resolve its public URL. Returns `(key, url)`.
async fn store_photo(
    objects: &dyn ObjectStore,
    photo: PhotoUpload,
    ext: &str,
) -> Result<(String, String), AppError> {
    let key = photo_key(ext);

    objects
        .put(&key, photo_content_type(ext), photo.bytes)
        .await
        .map_err(|e| {
            tracing::error!(key = %key, error = %e, "Photo upload failed");
            AppError::upload_failed("Failed to upload photo")
        })?;

    let url = objects.public_url(&key).map_err(|e| {
        tracing::error!(key = %key, error = %e, "Public URL lookup failed");
        AppError::upload_failed("Failed to get public URL")
    })?;

    Ok((key, url))
}

/// File a missing-person report.
///
/// Every check (required fields, dates, photo type and size) runs before
/// anything is written. The photo, when present, is uploaded before the
/// row is inserted; if the insert then fails the object stays behind and
/// its key is logged.
#[tracing::instrument(skip(cases, objects, form, photo), fields(reporter = %reporter_id))]
pub async fn submit_report(
    cases: &dyn CaseStore,
    objects: &dyn ObjectStore,
    reporter_id: Uuid,
    form: NewReportForm,
    photo: Option<PhotoUpload>,
    today: NaiveDate,
) -> Result<MissingPerson, AppError> {
    form.validate_request()?;
    form.parse_dates(today)?;

    let photo = photo.filter(|p| !p.bytes.is_empty());
    let checked = match photo {
        Some(p) => {
            let ext = check_photo(&p)?;
            Some((p, ext))
        }
        None => None,
    };

    let (photo_key, photo_url) = match checked {
        Some((p, ext)) => {
            let (key, url) = store_photo(objects, p, ext).await?;
            (Some(key), Some(url))
        }
        None => (None, None),
    };

    let record = form.into_new_record(reporter_id, photo_url, today)?;

    match cases.insert_missing(record).await {
        Ok(row) => {
            tracing::info!(case_number = %row.case_number, "Report filed");
            Ok(row)
        }
        Err(e) => {
            if let Some(key) = photo_key {
                tracing::warn!(key = %key, "Photo stored for a report that was not saved");
            }
            tracing::error!(error = %e, "Report insert failed");
            Err(AppError::bad_request(e.user_message()))
        }
    }
}
