//! Store settings route handlers.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::db::{SettingsRepository, SettingsUpdate};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::ApiEnvelope;
use crate::state::AppState;

/// Save-settings request body. Every field is written as given.
#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    pub store_name: String,
    pub tagline: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub currency: String,
    pub logo_url: Option<String>,
}

/// `GET /api/settings/store` - The seller's store settings.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let settings = SettingsRepository::new(state.pool())
        .get(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store settings".to_string()))?;

    Ok(Json(ApiEnvelope::data(settings)))
}

/// `PUT /api/settings/store` - Save the seller's store settings.
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<SaveSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let store_name = body.store_name.trim();
    if store_name.is_empty() {
        return Err(AppError::BadRequest(
            "Store name must not be empty".to_string(),
        ));
    }
    let currency = body.currency.trim().to_uppercase();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest(
            "Currency must be a 3-letter code".to_string(),
        ));
    }

    let settings = SettingsRepository::new(state.pool())
        .upsert(
            user.id,
            SettingsUpdate {
                store_name,
                tagline: body.tagline.as_deref(),
                address: body.address.as_deref(),
                phone: body.phone.as_deref(),
                currency: &currency,
                logo_url: body.logo_url.as_deref(),
            },
        )
        .await?;

    Ok(Json(ApiEnvelope::data(settings)))
}
