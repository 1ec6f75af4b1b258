//! Store settings repository.
//!
//! One row per seller. Writes are upserts so the first save and every later
//! save go through the same path.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shoptill_core::UserId;

use super::RepositoryError;
use crate::models::StoreSettings;

/// Database row for the `store_settings` table.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    seller_id: i64,
    store_name: String,
    tagline: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    currency: String,
    logo_url: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for StoreSettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            seller_id: UserId::new(row.seller_id),
            store_name: row.store_name,
            tagline: row.tagline,
            address: row.address,
            phone: row.phone,
            currency: row.currency,
            logo_url: row.logo_url,
            updated_at: row.updated_at,
        }
    }
}

const SETTINGS_COLUMNS: &str =
    "seller_id, store_name, tagline, address, phone, currency, logo_url, updated_at";

/// Input for saving settings. Every field is written as given.
#[derive(Debug)]
pub struct SettingsUpdate<'a> {
    pub store_name: &'a str,
    pub tagline: Option<&'a str>,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub currency: &'a str,
    pub logo_url: Option<&'a str>,
}

/// Repository for store settings database operations.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the seller's settings, if they have ever been saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, seller_id: UserId) -> Result<Option<StoreSettings>, RepositoryError> {
        let sql = format!("SELECT {SETTINGS_COLUMNS} FROM store_settings WHERE seller_id = $1");
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(seller_id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(StoreSettings::from))
    }

    /// Save the seller's settings, inserting the row on first save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        seller_id: UserId,
        update: SettingsUpdate<'_>,
    ) -> Result<StoreSettings, RepositoryError> {
        let sql = format!(
            "INSERT INTO store_settings \
             (seller_id, store_name, tagline, address, phone, currency, logo_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (seller_id) DO UPDATE SET \
               store_name = EXCLUDED.store_name, \
               tagline = EXCLUDED.tagline, \
               address = EXCLUDED.address, \
               phone = EXCLUDED.phone, \
               currency = EXCLUDED.currency, \
               logo_url = EXCLUDED.logo_url, \
               updated_at = NOW() \
             RETURNING {SETTINGS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(seller_id.as_i64())
            .bind(update.store_name)
            .bind(update.tagline)
            .bind(update.address)
            .bind(update.phone)
            .bind(update.currency)
            .bind(update.logo_url)
            .fetch_one(self.pool)
            .await?;

        Ok(StoreSettings::from(row))
    }
}
