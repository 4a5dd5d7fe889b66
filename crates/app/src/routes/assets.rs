use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use server::storage::ObjectStore;
use shared_ui::{APP_CSS, TABLE_JS};

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

pub async fn table_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        TABLE_JS,
    )
}

/// Serve a stored photo. Public URLs point here when photos are kept in
/// memory rather than a bucket.
#[tracing::instrument(skip(objects))]
pub async fn photo(
    State(objects): State<Arc<dyn ObjectStore>>,
    Path(key): Path<String>,
) -> Response {
    match objects.get(&key).await {
        Ok(Some(object)) => (
            [
                (header::CONTENT_TYPE, object.content_type),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            ],
            object.body,
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Photo read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
