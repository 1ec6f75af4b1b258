//! Account management commands.
//!
//! # Usage
//!
//! ```bash
//! shoptill-cli account create -e owner@example.com -n "Owner Name" -p 'Str0ng!pass'
//! ```
//!
//! Creates the permanent account directly, skipping the staged signup and
//! email verification. Intended for bootstrapping and local development.
//!
//! # Environment Variables
//!
//! - `SHOPTILL_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string

use sqlx::PgPool;
use thiserror::Error;

use shoptill_core::{Email, PasswordChecks, UserRole};

/// bcrypt work factor, matching the server.
const BCRYPT_COST: u32 = 12;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: seller, admin")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] shoptill_core::EmailError),

    /// Password failed the strength rules.
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// An account already exists for the email.
    #[error("Account already exists for email: {0}")]
    AccountExists(String),

    /// Password hashing failed.
    #[error("Password hashing error")]
    PasswordHash,
}

/// Create a new account.
///
/// # Errors
///
/// Returns `AccountError` for invalid input, a duplicate email, or database
/// failures.
pub async fn create(email: &str, name: &str, password: &str, role: &str) -> Result<(), AccountError> {
    dotenvy::dotenv().ok();

    let role: UserRole = role
        .parse()
        .map_err(|_| AccountError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email)?;

    let checks = PasswordChecks::evaluate(password);
    if !checks.is_valid() {
        return Err(AccountError::WeakPassword(checks.failed_rules().join(", ")));
    }

    let database_url = std::env::var("SHOPTILL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AccountError::MissingEnvVar("SHOPTILL_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
        .bind(email.as_str())
        .fetch_one(&pool)
        .await?;
    if exists {
        return Err(AccountError::AccountExists(email.to_string()));
    }

    let password_hash =
        bcrypt::hash(password, BCRYPT_COST).map_err(|_| AccountError::PasswordHash)?;

    tracing::info!("Creating account: {} ({})", email, role);
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email.as_str())
    .bind(&password_hash)
    .bind(role.to_string())
    .fetch_one(&pool)
    .await?;

    tracing::info!("Account created with id {id}");
    Ok(())
}
