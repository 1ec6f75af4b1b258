//! Service catalog repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shoptill_core::{ServiceId, UserId};

use super::RepositoryError;
use crate::models::ServiceItem;

/// Database row for the `services` table.
#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    seller_id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    duration_minutes: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for ServiceItem {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: ServiceId::new(row.id),
            seller_id: UserId::new(row.seller_id),
            name: row.name,
            description: row.description,
            price: row.price,
            duration_minutes: row.duration_minutes,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SERVICE_COLUMNS: &str =
    "id, seller_id, name, description, price, duration_minutes, is_active, \
     created_at, updated_at";

/// Input for creating a catalog entry.
#[derive(Debug)]
pub struct NewService<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: Decimal,
    pub duration_minutes: i32,
}

/// Input for updating a catalog entry. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct ServiceUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

/// Repository for service catalog database operations.
pub struct ServiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new service catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a seller's services, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, seller_id: UserId) -> Result<Vec<ServiceItem>, RepositoryError> {
        let sql = format!(
            "SELECT {SERVICE_COLUMNS} FROM services \
             WHERE seller_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(seller_id.as_i64())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(ServiceItem::from).collect())
    }

    /// Create a catalog entry for the seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        seller_id: UserId,
        new: NewService<'_>,
    ) -> Result<ServiceItem, RepositoryError> {
        let sql = format!(
            "INSERT INTO services (seller_id, name, description, price, duration_minutes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SERVICE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(seller_id.as_i64())
            .bind(new.name)
            .bind(new.description)
            .bind(new.price)
            .bind(new.duration_minutes)
            .fetch_one(self.pool)
            .await?;

        Ok(ServiceItem::from(row))
    }

    /// Apply a partial update to one of the seller's services.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service doesn't exist or
    /// belongs to another seller.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        seller_id: UserId,
        id: ServiceId,
        update: ServiceUpdate<'_>,
    ) -> Result<ServiceItem, RepositoryError> {
        let sql = format!(
            "UPDATE services SET \
               name = COALESCE($3, name), \
               description = COALESCE($4, description), \
               price = COALESCE($5, price), \
               duration_minutes = COALESCE($6, duration_minutes), \
               is_active = COALESCE($7, is_active), \
               updated_at = NOW() \
             WHERE id = $1 AND seller_id = $2 \
             RETURNING {SERVICE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .bind(update.name)
            .bind(update.description)
            .bind(update.price)
            .bind(update.duration_minutes)
            .bind(update.is_active)
            .fetch_optional(self.pool)
            .await?;

        row.map(ServiceItem::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete one of the seller's services.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service doesn't exist or
    /// belongs to another seller.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, seller_id: UserId, id: ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND seller_id = $2")
            .bind(id.as_i64())
            .bind(seller_id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
