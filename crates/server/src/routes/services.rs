//! Service catalog route handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;

use shoptill_core::ServiceId;

use crate::db::{NewService, ServiceRepository, ServiceUpdate};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::ApiEnvelope;
use crate::state::AppState;

/// Create-service request body.
#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
}

/// Update-service request body. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

/// `GET /api/services` - List the seller's services.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let services = ServiceRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(ApiEnvelope::data(services)))
}

/// `POST /api/services` - Add a service.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    if body.price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Price must not be negative".to_string(),
        ));
    }
    if body.duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "Duration must be positive".to_string(),
        ));
    }

    let service = ServiceRepository::new(state.pool())
        .create(
            user.id,
            NewService {
                name,
                description: body.description.as_deref(),
                price: body.price,
                duration_minutes: body.duration_minutes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiEnvelope::data(service))))
}

/// `PUT /api/services/{id}` - Update a service.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(price) = body.price
        && price < Decimal::ZERO
    {
        return Err(AppError::BadRequest(
            "Price must not be negative".to_string(),
        ));
    }
    if let Some(duration) = body.duration_minutes
        && duration <= 0
    {
        return Err(AppError::BadRequest(
            "Duration must be positive".to_string(),
        ));
    }

    let service = ServiceRepository::new(state.pool())
        .update(
            user.id,
            ServiceId::new(id),
            ServiceUpdate {
                name: body.name.as_deref().map(str::trim),
                description: body.description.as_deref(),
                price: body.price,
                duration_minutes: body.duration_minutes,
                is_active: body.is_active,
            },
        )
        .await?;

    Ok(Json(ApiEnvelope::data(service)))
}

/// `DELETE /api/services/{id}` - Remove a service.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ServiceRepository::new(state.pool())
        .delete(user.id, ServiceId::new(id))
        .await?;

    Ok(Json(ApiEnvelope::<()>::message("Service deleted")))
}
