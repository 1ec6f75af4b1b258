//! Inventory route handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;

use shoptill_core::ProductId;

use crate::db::{NewProduct, ProductRepository, ProductUpdate};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::ApiEnvelope;
use crate::state::AppState;

/// Create-product request body.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub low_stock_threshold: Option<i32>,
}

/// Update-product request body. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub low_stock_threshold: Option<i32>,
    pub is_active: Option<bool>,
}

/// `GET /api/inventory` - List the seller's products.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let products = ProductRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(ApiEnvelope::data(products)))
}

/// `POST /api/inventory` - Add a product.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = body.name.trim();
    let sku = body.sku.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    if sku.is_empty() {
        return Err(AppError::BadRequest("SKU must not be empty".to_string()));
    }
    if body.price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Price must not be negative".to_string(),
        ));
    }
    if body.quantity < 0 {
        return Err(AppError::BadRequest(
            "Quantity must not be negative".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .create(
            user.id,
            NewProduct {
                name,
                sku,
                price: body.price,
                quantity: body.quantity,
                low_stock_threshold: body.low_stock_threshold.unwrap_or(5).max(0),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiEnvelope::data(product))))
}

/// `PUT /api/inventory/{id}` - Update a product.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(price) = body.price
        && price < Decimal::ZERO
    {
        return Err(AppError::BadRequest(
            "Price must not be negative".to_string(),
        ));
    }
    if let Some(quantity) = body.quantity
        && quantity < 0
    {
        return Err(AppError::BadRequest(
            "Quantity must not be negative".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .update(
            user.id,
            ProductId::new(id),
            ProductUpdate {
                name: body.name.as_deref().map(str::trim),
                sku: body.sku.as_deref().map(str::trim),
                price: body.price,
                quantity: body.quantity,
                low_stock_threshold: body.low_stock_threshold,
                is_active: body.is_active,
            },
        )
        .await?;

    Ok(Json(ApiEnvelope::data(product)))
}

/// `DELETE /api/inventory/{id}` - Remove a product.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ProductRepository::new(state.pool())
        .delete(user.id, ProductId::new(id))
        .await?;

    Ok(Json(ApiEnvelope::<()>::message("Product deleted")))
}

/// `GET /api/inventory/stats` - Aggregated inventory figures.
pub async fn stats(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let stats = ProductRepository::new(state.pool()).stats(user.id).await?;
    Ok(Json(ApiEnvelope::data(stats)))
}
