//! Order domain types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoptill_core::{OrderChannel, OrderId, OrderStatus, ProductId, UserId};

/// A line on an order. Stored as jsonb inside the order row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Inventory product this line sold, if it came from inventory.
    pub product_id: Option<ProductId>,
    /// Name at time of sale.
    pub name: String,
    /// Units sold.
    pub quantity: i32,
    /// Unit price at time of sale.
    pub unit_price: Decimal,
}

impl OrderItem {
    /// The line total.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Input for one order line at creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// An order (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning seller. Every query filters on this.
    #[serde(skip)]
    pub seller_id: UserId,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email, if captured.
    pub customer_email: Option<String>,
    /// Where the order came in.
    pub channel: OrderChannel,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Order total; the server computes this from the lines.
    pub total: Decimal,
    /// Order lines.
    pub items: Vec<OrderItem>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Aggregated order figures for one seller.
#[derive(Debug, Clone, Serialize)]
pub struct OrderStats {
    /// Total number of orders.
    pub total_orders: i64,
    /// Revenue across non-cancelled orders.
    pub revenue: Decimal,
    /// Order count per status.
    pub by_status: HashMap<OrderStatus, i64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            product_id: Some(ProductId::new(1)),
            name: "Beeswax candle".to_string(),
            quantity: 3,
            unit_price: Decimal::new(450, 2), // 4.50
        };
        assert_eq!(item.line_total(), Decimal::new(1350, 2));
    }

    #[test]
    fn test_item_jsonb_roundtrip() {
        let item = OrderItem {
            product_id: None,
            name: "Gift wrap".to_string(),
            quantity: 1,
            unit_price: Decimal::new(200, 2),
        };
        let value = serde_json::to_value(&item).unwrap();
        let back: OrderItem = serde_json::from_value(value).unwrap();
        assert_eq!(back.name, "Gift wrap");
        assert_eq!(back.unit_price, Decimal::new(200, 2));
        assert!(back.product_id.is_none());
    }
}
