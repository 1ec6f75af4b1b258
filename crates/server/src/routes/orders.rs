//! Order route handlers.
//!
//! Placing an order decrements inventory atomically and raises a
//! notification; crossing a low-stock threshold raises a second one.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;

use shoptill_core::{NotificationKind, OrderChannel, OrderId, OrderStatus};

use crate::db::{NewOrder, NotificationRepository, OrderFilter, OrderRepository};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{ApiEnvelope, NewOrderItem, Order};
use crate::state::AppState;

/// Create-order request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub channel: OrderChannel,
    pub items: Vec<NewOrderItem>,
}

/// Status-change request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/orders` - List the seller's orders.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list(
            user.id,
            OrderFilter {
                status: query.status,
                limit: query.limit,
                offset: query.offset,
            },
        )
        .await?;

    Ok(Json(ApiEnvelope::data(orders)))
}

/// `GET /api/orders/{id}` - One order in full.
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let order = OrderRepository::new(state.pool())
        .get(user.id, OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    Ok(Json(ApiEnvelope::data(order)))
}

/// `POST /api/orders` - Place an order.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer_name = body.customer_name.trim();
    if customer_name.is_empty() {
        return Err(AppError::BadRequest(
            "Customer name must not be empty".to_string(),
        ));
    }
    if body.items.is_empty() {
        return Err(AppError::BadRequest(
            "Order must have at least one item".to_string(),
        ));
    }
    for item in &body.items {
        if item.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Item name must not be empty".to_string(),
            ));
        }
        if item.quantity <= 0 {
            return Err(AppError::BadRequest(
                "Item quantity must be positive".to_string(),
            ));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "Item price must not be negative".to_string(),
            ));
        }
    }

    let (order, touched) = OrderRepository::new(state.pool())
        .create(
            user.id,
            NewOrder {
                customer_name,
                customer_email: body.customer_email.as_deref(),
                channel: body.channel,
                items: &body.items,
            },
        )
        .await?;

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");

    raise_order_notifications(&state, &order, &touched).await;

    Ok((StatusCode::CREATED, Json(ApiEnvelope::data(order))))
}

/// `PATCH /api/orders/{id}/status` - Move an order to a new status.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = OrderRepository::new(state.pool())
        .update_status(user.id, OrderId::new(id), body.status)
        .await?;

    Ok(Json(ApiEnvelope::data(order)))
}

/// `GET /api/orders/stats` - Aggregated order figures.
pub async fn stats(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let stats = OrderRepository::new(state.pool()).stats(user.id).await?;
    Ok(Json(ApiEnvelope::data(stats)))
}

/// Raise the feed entries for a new order. Failures are logged, never fatal;
/// the order is already committed.
async fn raise_order_notifications(
    state: &AppState,
    order: &Order,
    touched: &[crate::models::Product],
) {
    let notifications = NotificationRepository::new(state.pool());

    if let Err(e) = notifications
        .create(
            order.seller_id,
            NotificationKind::Order,
            "New order",
            &format!("Order from {} for {}", order.customer_name, order.total),
        )
        .await
    {
        tracing::warn!(error = %e, "Failed to raise order notification");
    }

    for product in touched.iter().filter(|p| p.is_low_stock()) {
        if let Err(e) = notifications
            .create(
                order.seller_id,
                NotificationKind::LowStock,
                "Low stock",
                &format!(
                    "{} is down to {} unit(s)",
                    product.name, product.quantity
                ),
            )
            .await
        {
            tracing::warn!(error = %e, "Failed to raise low-stock notification");
        }
    }
}
