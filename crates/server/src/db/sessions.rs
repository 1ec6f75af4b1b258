//! Session repository.
//!
//! A session row ties an opaque token to a user and an expiry instant. Only
//! rows whose expiry is in the future authenticate a request; expired rows
//! are filtered at read time rather than swept by a background job.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore as _;
use sqlx::PgPool;

use shoptill_core::UserId;

use super::RepositoryError;
use super::users::UserRow;
use crate::models::{CurrentUser, Session, User};

/// How long a session authenticates requests after issuance.
pub const SESSION_TTL: Duration = Duration::days(7);

/// Random bytes per token. Encoded to 43 URL-safe base64 characters.
const TOKEN_BYTES: usize = 32;

/// Generate an unguessable session token.
///
/// 256 bits from the thread-local CSPRNG, URL-safe base64 without padding.
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a session for `user_id` with a fresh token and a 7-day expiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: UserId) -> Result<Session, RepositoryError> {
        let token = generate_token();
        let issued_at = Utc::now();
        let expires_at = issued_at + SESSION_TTL;

        sqlx::query(
            "INSERT INTO sessions (token, user_id, issued_at, expires_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&token)
        .bind(user_id.as_i64())
        .bind(issued_at)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(Session {
            token,
            user_id,
            issued_at,
            expires_at,
        })
    }

    /// Resolve a token to its owning user.
    ///
    /// Returns `None` for tokens that don't exist, have expired, or belong to
    /// a deactivated account. The expiry filter lives in the query so a stale
    /// row can never authenticate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn find_valid(&self, token: &str) -> Result<Option<CurrentUser>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.name, u.email, u.role, u.is_active, u.last_login_at, \
                    u.current_subscription_id, u.created_at, u.updated_at \
             FROM sessions s \
             JOIN users u ON u.id = s.user_id \
             WHERE s.token = $1 AND s.expires_at > NOW() AND u.is_active",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user = User::try_from(row)?;
        Ok(Some(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            session_token: token.to_owned(),
        }))
    }

    /// Delete a session by token.
    ///
    /// Idempotent: deleting a token that doesn't exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_is_url_safe_base64() {
        let token = generate_token();
        // 32 bytes -> ceil(32 * 4 / 3) = 43 chars without padding
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_session_ttl_is_seven_days() {
        assert_eq!(SESSION_TTL.num_seconds(), 604_800);
    }
}
