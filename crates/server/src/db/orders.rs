//! Order repository.
//!
//! Order lines are stored as a jsonb column on the order row; they are
//! immutable once the order is placed. Creation decrements inventory inside
//! the same transaction with a `quantity >= n` guard, so an oversell fails
//! the whole order instead of driving stock negative.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use shoptill_core::{OrderChannel, OrderId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use super::products::ProductRow;
use crate::models::{NewOrderItem, Order, OrderItem, OrderStats, Product};

/// Database row for the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    seller_id: i64,
    customer_name: String,
    customer_email: Option<String>,
    channel: String,
    status: String,
    total: Decimal,
    items: Json<Vec<OrderItem>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let channel = row.channel.parse::<OrderChannel>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid channel in database: {e}"))
        })?;
        let status = row.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            seller_id: UserId::new(row.seller_id),
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            channel,
            status,
            total: row.total,
            items: row.items.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, seller_id, customer_name, customer_email, channel, status, total, items, \
     created_at, updated_at";

/// Input for placing an order.
#[derive(Debug)]
pub struct NewOrder<'a> {
    pub customer_name: &'a str,
    pub customer_email: Option<&'a str>,
    pub channel: OrderChannel,
    pub items: &'a [NewOrderItem],
}

/// Listing filters. `None` fields don't filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a seller's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn list(
        &self,
        seller_id: UserId,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE seller_id = $1 AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(seller_id.as_i64())
            .bind(filter.status.map(|s| s.to_string()))
            .bind(filter.limit.unwrap_or(50).clamp(1, 200))
            .bind(filter.offset.unwrap_or(0).max(0))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Get one of the seller's orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get(
        &self,
        seller_id: UserId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND seller_id = $2");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Place an order and decrement inventory in one transaction.
    ///
    /// Each inventory-backed line runs a guarded decrement
    /// (`quantity >= sold`); if any guard fails the transaction rolls back
    /// and the whole order is rejected with `Conflict`. Returns the order and
    /// the post-decrement state of each inventory product touched, so the
    /// caller can raise low-stock notifications.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if any line oversells its product
    /// or names a product the seller doesn't have.
    /// Returns `RepositoryError::Database` for other database errors.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn create(
        &self,
        seller_id: UserId,
        new: NewOrder<'_>,
    ) -> Result<(Order, Vec<Product>), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut touched = Vec::new();
        for item in new.items {
            let Some(product_id) = item.product_id else {
                continue;
            };
            let updated = decrement_stock(&mut tx, seller_id, product_id, item.quantity).await?;
            let Some(row) = updated else {
                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for '{}'",
                    item.name
                )));
            };
            touched.push(Product::from(row));
        }

        let items: Vec<OrderItem> = new
            .items
            .iter()
            .map(|i| OrderItem {
                product_id: i.product_id,
                name: i.name.clone(),
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect();
        let total: Decimal = items.iter().map(OrderItem::line_total).sum();

        let sql = format!(
            "INSERT INTO orders \
             (seller_id, customer_name, customer_email, channel, status, total, items) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(seller_id.as_i64())
            .bind(new.customer_name)
            .bind(new.customer_email)
            .bind(new.channel.to_string())
            .bind(OrderStatus::Pending.to_string())
            .bind(total)
            .bind(Json(&items))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((Order::try_from(row)?, touched))
    }

    /// Move one of the seller's orders to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist or
    /// belongs to another seller.
    /// Returns `RepositoryError::Database` for other database errors.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn update_status(
        &self,
        seller_id: UserId,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            "UPDATE orders SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND seller_id = $2 \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .bind(status.to_string())
            .fetch_optional(self.pool)
            .await?;

        row.map(Order::try_from)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Aggregate order figures for the seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn stats(&self, seller_id: UserId) -> Result<OrderStats, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct StatusCountRow {
            status: String,
            count: i64,
            revenue: Decimal,
        }

        let rows = sqlx::query_as::<_, StatusCountRow>(
            "SELECT status, COUNT(*) AS count, COALESCE(SUM(total), 0) AS revenue \
             FROM orders \
             WHERE seller_id = $1 \
             GROUP BY status",
        )
        .bind(seller_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let mut stats = OrderStats {
            total_orders: 0,
            revenue: Decimal::ZERO,
            by_status: std::collections::HashMap::new(),
        };
        for row in rows {
            let status = row.status.parse::<OrderStatus>().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
            })?;
            stats.total_orders += row.count;
            if status != OrderStatus::Cancelled {
                stats.revenue += row.revenue;
            }
            stats.by_status.insert(status, row.count);
        }

        Ok(stats)
    }
}

/// Guarded stock decrement. Returns the updated row, or `None` when the
/// product is missing, inactive, owned by another seller, or short on stock.
async fn decrement_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    seller_id: UserId,
    product_id: ProductId,
    quantity: i32,
) -> Result<Option<ProductRow>, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "UPDATE products \
         SET quantity = quantity - $3, updated_at = NOW() \
         WHERE id = $1 AND seller_id = $2 AND is_active AND quantity >= $3 \
         RETURNING id, seller_id, name, sku, price, quantity, low_stock_threshold, \
                   is_active, created_at, updated_at",
    )
    .bind(product_id.as_i64())
    .bind(seller_id.as_i64())
    .bind(quantity)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row)
}
