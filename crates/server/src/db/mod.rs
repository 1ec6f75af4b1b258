//! Database operations for the Shoptill `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - Permanent seller accounts
//! - `sessions` - Opaque session tokens with expiry
//! - `temp_users` - Staged signups awaiting email-code confirmation
//! - `products` - Inventory, scoped by seller
//! - `orders` - POS and online orders, scoped by seller
//! - `notifications` - Per-seller notification feed
//! - `store_settings` - One row of store/website settings per seller
//! - `services` - Service catalog entries, scoped by seller
//!
//! Every seller-owned table carries a `seller_id` column and every query
//! filters on it; cross-tenant reads surface as `NotFound` at the HTTP layer.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shoptill-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod notifications;
pub mod orders;
pub mod products;
pub mod services_catalog;
pub mod sessions;
pub mod settings;
pub mod temp_users;
pub mod users;

pub use notifications::{NotificationFilter, NotificationRepository};
pub use orders::{NewOrder, OrderFilter, OrderRepository};
pub use products::{NewProduct, ProductRepository, ProductUpdate};
pub use services_catalog::{NewService, ServiceRepository, ServiceUpdate};
pub use sessions::{SESSION_TTL, SessionRepository, generate_token};
pub use settings::{SettingsRepository, SettingsUpdate};
pub use temp_users::{NewTempUser, TempUserRepository};
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
