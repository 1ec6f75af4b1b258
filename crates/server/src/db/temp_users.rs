//! Staged-signup repository.
//!
//! A `temp_users` row stages a signup until its verification code is
//! confirmed. The resend budget is enforced by a single conditional UPDATE
//! so two concurrent resend requests cannot both pass a read-then-write
//! check; promotion creates the permanent user and deletes the staging row
//! in one transaction.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shoptill_core::{Email, TempUserId, UserRole};

use super::users::UserRow;
use super::{RepositoryError, conflict_on_unique};
use crate::models::{TempUser, User};

/// Database row for the `temp_users` table.
#[derive(Debug, sqlx::FromRow)]
struct TempUserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    verification_code: String,
    code_expires_at: DateTime<Utc>,
    resend_count: i32,
    request_ip: String,
    user_agent: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TempUserRow> for TempUser {
    type Error = RepositoryError;

    fn try_from(row: TempUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: TempUserId::new(row.id),
            name: row.name,
            email,
            password_hash: row.password_hash,
            verification_code: row.verification_code,
            code_expires_at: row.code_expires_at,
            resend_count: row.resend_count,
            request_ip: row.request_ip,
            user_agent: row.user_agent,
            created_at: row.created_at,
        })
    }
}

const TEMP_USER_COLUMNS: &str = "id, name, email, password_hash, verification_code, \
                                 code_expires_at, resend_count, request_ip, user_agent, created_at";

/// Input for staging a new signup.
#[derive(Debug)]
pub struct NewTempUser<'a> {
    pub name: &'a str,
    pub email: &'a Email,
    pub password_hash: &'a str,
    pub verification_code: &'a str,
    pub code_expires_at: DateTime<Utc>,
    pub request_ip: &'a str,
    pub user_agent: &'a str,
}

/// Repository for staged-signup database operations.
pub struct TempUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TempUserRepository<'a> {
    /// Create a new staged-signup repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Stage a signup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a pending signup already exists
    /// for the email (unique index).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewTempUser<'_>) -> Result<TempUser, RepositoryError> {
        let sql = format!(
            "INSERT INTO temp_users \
             (name, email, password_hash, verification_code, code_expires_at, \
              request_ip, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {TEMP_USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TempUserRow>(&sql)
            .bind(new.name)
            .bind(new.email.as_str())
            .bind(new.password_hash)
            .bind(new.verification_code)
            .bind(new.code_expires_at)
            .bind(new.request_ip)
            .bind(new.user_agent)
            .fetch_one(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "pending signup"))?;

        TempUser::try_from(row)
    }

    /// Get a staged signup by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<TempUser>, RepositoryError> {
        let sql = format!("SELECT {TEMP_USER_COLUMNS} FROM temp_users WHERE email = $1");
        let row = sqlx::query_as::<_, TempUserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(TempUser::try_from).transpose()
    }

    /// Record a code resend as one conditional atomic update.
    ///
    /// Regenerates the code and expiry and increments the counter only while
    /// `resend_count` is under the cap. Returns the updated row, or `None`
    /// when no row matched (missing record OR exhausted budget; the caller
    /// disambiguates with [`Self::get_by_email`]).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn record_resend(
        &self,
        email: &Email,
        new_code: &str,
        new_expiry: DateTime<Utc>,
    ) -> Result<Option<TempUser>, RepositoryError> {
        let sql = format!(
            "UPDATE temp_users \
             SET verification_code = $1, code_expires_at = $2, resend_count = resend_count + 1 \
             WHERE email = $3 AND resend_count < $4 \
             RETURNING {TEMP_USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TempUserRow>(&sql)
            .bind(new_code)
            .bind(new_expiry)
            .bind(email.as_str())
            .bind(TempUser::MAX_RESENDS)
            .fetch_optional(self.pool)
            .await?;

        row.map(TempUser::try_from).transpose()
    }

    /// Promote a confirmed signup to a permanent user.
    ///
    /// The user insert and the staging-row delete happen in one transaction;
    /// a crash between the two cannot leave both records behind.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a permanent account for the
    /// email appeared since the signup was staged.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn promote(&self, staged: &TempUser) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, role, is_active, last_login_at, \
                       current_subscription_id, created_at, updated_at",
        )
        .bind(&staged.name)
        .bind(staged.email.as_str())
        .bind(&staged.password_hash)
        .bind(UserRole::Seller.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "account"))?;

        sqlx::query("DELETE FROM temp_users WHERE id = $1")
            .bind(staged.id.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        User::try_from(row)
    }

    /// Drop a staged signup. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: TempUserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM temp_users WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
