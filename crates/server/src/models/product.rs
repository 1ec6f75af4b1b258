//! Inventory domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shoptill_core::{ProductId, UserId};

/// A stocked product (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Owning seller. Every query filters on this.
    #[serde(skip)]
    pub seller_id: UserId,
    /// Display name.
    pub name: String,
    /// Stock-keeping unit, unique per seller.
    pub sku: String,
    /// Unit price.
    pub price: Decimal,
    /// Units on hand.
    pub quantity: i32,
    /// Stock level at or below which the product counts as low stock.
    pub low_stock_threshold: i32,
    /// Whether the product is listed.
    pub is_active: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is at or below its low-stock threshold.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

/// Aggregated inventory figures for one seller.
///
/// Computed by SQL aggregates, not by loading rows.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryStats {
    /// Number of active products.
    pub product_count: i64,
    /// Total units on hand across active products.
    pub total_units: i64,
    /// Sum of `price * quantity` across active products.
    pub stock_value: Decimal,
    /// Active products at or below their low-stock threshold (excluding out of stock).
    pub low_stock_count: i64,
    /// Active products with zero units on hand.
    pub out_of_stock_count: i64,
}
