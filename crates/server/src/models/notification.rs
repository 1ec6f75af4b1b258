//! Notification domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shoptill_core::{NotificationId, NotificationKind, UserId};

/// One entry in a seller's notification feed.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique notification ID.
    pub id: NotificationId,
    /// Owning seller.
    #[serde(skip)]
    pub user_id: UserId,
    /// Category.
    pub kind: NotificationKind,
    /// Short heading.
    pub title: String,
    /// Detail text.
    pub body: String,
    /// Whether the seller has seen it.
    pub is_read: bool,
    /// When it was raised.
    pub created_at: DateTime<Utc>,
}
