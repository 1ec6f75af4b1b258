//! Upload route handlers.
//!
//! Accepts a multipart file, stores it in object storage under a
//! seller-scoped key, and returns the public URL. Keys are random so an
//! uploaded filename can never collide with or overwrite another object.

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::ApiEnvelope;
use crate::state::AppState;

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
struct UploadResponse {
    key: String,
    url: String,
}

#[derive(Debug, Deserialize)]
pub struct PresignQuery {
    pub key: String,
}

#[derive(Debug, Serialize)]
struct PresignedUrl {
    url: String,
}

/// `POST /api/uploads` - Store a file and return its public URL.
pub async fn upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(
            "File exceeds the 5 MB upload limit".to_string(),
        ));
    }

    let key = object_key(user.id.as_i64(), &file_name);
    let url = state
        .storage()
        .put(&key, &content_type, bytes.to_vec())
        .await?;

    tracing::info!(%key, size = bytes.len(), "File uploaded");

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::data(UploadResponse { key, url })),
    ))
}

/// `GET /api/uploads/presign` - A short-lived URL for a stored object.
pub async fn presign(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<PresignQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Sellers can only presign their own objects.
    let prefix = format!("sellers/{}/", user.id.as_i64());
    if !query.key.starts_with(&prefix) {
        return Err(AppError::NotFound("Object".to_string()));
    }

    let url = state.storage().presign(&query.key).await?;

    Ok(Json(ApiEnvelope::data(PresignedUrl { url })))
}

/// Build a seller-scoped random object key, keeping the original extension.
fn object_key(seller_id: i64, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(String::new, |ext| format!(".{}", ext.to_lowercase()));

    format!("sellers/{seller_id}/{}{extension}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_is_seller_scoped() {
        let key = object_key(7, "logo.PNG");
        assert!(key.starts_with("sellers/7/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_object_key_drops_odd_extensions() {
        let key = object_key(7, "no-extension");
        assert!(!key.contains('.'));

        let key = object_key(7, "weird.ex%t");
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_object_keys_are_unique() {
        assert_ne!(object_key(7, "a.png"), object_key(7, "a.png"));
    }
}
