//! Inventory repository.
//!
//! Every query is scoped by `seller_id`; a product belonging to another
//! seller is indistinguishable from one that doesn't exist. Stock decrements
//! for orders live in [`super::orders`] so they can share the order
//! transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shoptill_core::{ProductId, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{InventoryStats, Product};

/// Database row for the `products` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub seller_id: i64,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            seller_id: UserId::new(row.seller_id),
            name: row.name,
            sku: row.sku,
            price: row.price,
            quantity: row.quantity,
            low_stock_threshold: row.low_stock_threshold,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, seller_id, name, sku, price, quantity, low_stock_threshold, \
                               is_active, created_at, updated_at";

/// Input for creating a product.
#[derive(Debug)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub sku: &'a str,
    pub price: Decimal,
    pub quantity: i32,
    pub low_stock_threshold: i32,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct ProductUpdate<'a> {
    pub name: Option<&'a str>,
    pub sku: Option<&'a str>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub low_stock_threshold: Option<i32>,
    pub is_active: Option<bool>,
}

/// Repository for inventory database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a seller's products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, seller_id: UserId) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE seller_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(seller_id.as_i64())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get one of the seller's products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        seller_id: UserId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND seller_id = $2");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Create a product for the seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the seller already has a product
    /// with the same SKU.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        seller_id: UserId,
        new: NewProduct<'_>,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products \
             (seller_id, name, sku, price, quantity, low_stock_threshold) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(seller_id.as_i64())
            .bind(new.name)
            .bind(new.sku)
            .bind(new.price)
            .bind(new.quantity)
            .bind(new.low_stock_threshold)
            .fetch_one(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "product SKU"))?;

        Ok(Product::from(row))
    }

    /// Apply a partial update to one of the seller's products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist or
    /// belongs to another seller.
    /// Returns `RepositoryError::Conflict` if the new SKU is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        seller_id: UserId,
        id: ProductId,
        update: ProductUpdate<'_>,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET \
               name = COALESCE($3, name), \
               sku = COALESCE($4, sku), \
               price = COALESCE($5, price), \
               quantity = COALESCE($6, quantity), \
               low_stock_threshold = COALESCE($7, low_stock_threshold), \
               is_active = COALESCE($8, is_active), \
               updated_at = NOW() \
             WHERE id = $1 AND seller_id = $2 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .bind(update.name)
            .bind(update.sku)
            .bind(update.price)
            .bind(update.quantity)
            .bind(update.low_stock_threshold)
            .bind(update.is_active)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "product SKU"))?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete one of the seller's products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist or
    /// belongs to another seller.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, seller_id: UserId, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND seller_id = $2")
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Aggregate inventory figures for the seller's active products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self, seller_id: UserId) -> Result<InventoryStats, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct StatsRow {
            product_count: i64,
            total_units: i64,
            stock_value: Decimal,
            low_stock_count: i64,
            out_of_stock_count: i64,
        }

        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT \
               COUNT(*) AS product_count, \
               COALESCE(SUM(quantity), 0)::BIGINT AS total_units, \
               COALESCE(SUM(price * quantity), 0) AS stock_value, \
               COUNT(*) FILTER (WHERE quantity > 0 AND quantity <= low_stock_threshold) \
                 AS low_stock_count, \
               COUNT(*) FILTER (WHERE quantity = 0) AS out_of_stock_count \
             FROM products \
             WHERE seller_id = $1 AND is_active",
        )
        .bind(seller_id.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok(InventoryStats {
            product_count: row.product_count,
            total_units: row.total_units,
            stock_value: row.stock_value,
            low_stock_count: row.low_stock_count,
            out_of_stock_count: row.out_of_stock_count,
        })
    }
}
