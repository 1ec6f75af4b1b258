//! Service catalog domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shoptill_core::{ServiceId, UserId};

/// A bookable service offered by the store (e.g., repairs, fittings).
#[derive(Debug, Clone, Serialize)]
pub struct ServiceItem {
    /// Unique service ID.
    pub id: ServiceId,
    /// Owning seller.
    #[serde(skip)]
    pub seller_id: UserId,
    /// Display name.
    pub name: String,
    /// Longer description shown on the website.
    pub description: Option<String>,
    /// Price for one booking.
    pub price: Decimal,
    /// How long one booking takes.
    pub duration_minutes: i32,
    /// Whether the service is offered.
    pub is_active: bool,
    /// When the service was created.
    pub created_at: DateTime<Utc>,
    /// When the service was last updated.
    pub updated_at: DateTime<Utc>,
}
