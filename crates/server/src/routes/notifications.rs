//! Notification route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use shoptill_core::NotificationId;

use crate::db::{NotificationFilter, NotificationRepository};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::ApiEnvelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct UnreadCount {
    unread: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    unread: bool,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// `GET /api/notifications` - The seller's notification feed, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = NotificationFilter {
        unread_only: query.unread,
        limit: query.limit,
        offset: query.offset,
    };
    let notifications = NotificationRepository::new(state.pool())
        .list(user.id, &filter)
        .await?;

    Ok(Json(ApiEnvelope::data(notifications)))
}

/// `GET /api/notifications/unread-count` - How many entries are unread.
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let unread = NotificationRepository::new(state.pool())
        .unread_count(user.id)
        .await?;

    Ok(Json(ApiEnvelope::data(UnreadCount { unread })))
}

/// `PATCH /api/notifications/{id}/read` - Mark one entry as read.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    NotificationRepository::new(state.pool())
        .mark_read(user.id, NotificationId::new(id))
        .await?;

    Ok(Json(ApiEnvelope::<()>::message("Notification marked read")))
}

/// `POST /api/notifications/read-all` - Mark the whole feed as read.
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    let changed = NotificationRepository::new(state.pool())
        .mark_all_read(user.id)
        .await?;

    Ok(Json(ApiEnvelope::<()>::message(format!(
        "{changed} notification(s) marked read"
    ))))
}

/// `DELETE /api/notifications/{id}` - Remove one entry.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    NotificationRepository::new(state.pool())
        .delete(user.id, NotificationId::new(id))
        .await?;

    Ok(Json(ApiEnvelope::<()>::message("Notification deleted")))
}
