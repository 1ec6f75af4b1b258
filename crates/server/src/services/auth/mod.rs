//! Authentication service.
//!
//! Signup is staged: credentials land in `temp_users` with an emailed
//! 6-digit code, and only a confirmed code creates the permanent account.
//! Sign-in issues an opaque database-backed session token.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Duration, Utc};
use rand::Rng as _;
use sqlx::PgPool;

use shoptill_core::{Email, PasswordChecks};

use crate::db::{NewTempUser, SessionRepository, TempUserRepository, UserRepository};
use crate::models::{Session, TempUser, User};

/// bcrypt work factor.
const BCRYPT_COST: u32 = 12;

/// How long a verification code is accepted after it is issued.
const CODE_TTL: Duration = Duration::minutes(15);

/// Authentication operations over the user, staging, and session tables.
pub struct AuthService<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Stage a signup and return the staged record with its fresh code.
    ///
    /// The caller emails the code; it is never returned to the client.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` for
    /// rejected input, `AuthError::AccountExists` if a permanent account
    /// holds the email, and `AuthError::SignupAlreadyPending` if a staging
    /// row does.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        request_ip: &str,
        user_agent: &str,
    ) -> Result<TempUser, AuthError> {
        let email = Email::parse(email)?;

        let checks = PasswordChecks::evaluate(password);
        if !checks.is_valid() {
            return Err(AuthError::WeakPassword(checks.failed_rules().join(", ")));
        }

        let users = UserRepository::new(self.pool);
        if users.email_exists(&email).await? {
            return Err(AuthError::AccountExists);
        }

        let temp_users = TempUserRepository::new(self.pool);
        if temp_users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::SignupAlreadyPending);
        }

        let password_hash = hash_password(password).await?;
        let code = generate_verification_code();

        let staged = temp_users
            .create(NewTempUser {
                name,
                email: &email,
                password_hash: &password_hash,
                verification_code: &code,
                code_expires_at: code_expiry(Utc::now()),
                request_ip,
                user_agent,
            })
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::Conflict(_) => AuthError::SignupAlreadyPending,
                other => AuthError::Repository(other),
            })?;

        Ok(staged)
    }

    /// Regenerate and return the staged signup with a fresh code.
    ///
    /// The budget check and the regeneration are one conditional UPDATE, so
    /// concurrent resends cannot exceed the cap.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SignupNotFound` if nothing is pending for the
    /// email and `AuthError::ResendBudgetExhausted` once the cap is hit.
    pub async fn resend_code(&self, email: &str) -> Result<TempUser, AuthError> {
        let email = Email::parse(email)?;
        let temp_users = TempUserRepository::new(self.pool);

        let code = generate_verification_code();
        let updated = temp_users
            .record_resend(&email, &code, code_expiry(Utc::now()))
            .await?;

        match updated {
            Some(staged) => Ok(staged),
            // No row matched: either nothing is pending or the budget is gone.
            None => match temp_users.get_by_email(&email).await? {
                Some(_) => Err(AuthError::ResendBudgetExhausted),
                None => Err(AuthError::SignupNotFound),
            },
        }
    }

    /// Confirm a staged signup and promote it to a permanent account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SignupNotFound` if nothing is pending,
    /// `AuthError::InvalidCode` or `AuthError::CodeExpired` for a rejected
    /// code, and `AuthError::AccountExists` if the email was claimed since
    /// the signup was staged.
    pub async fn confirm_signup(&self, email: &str, code: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        let temp_users = TempUserRepository::new(self.pool);

        let staged = temp_users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::SignupNotFound)?;

        if staged.verification_code != code {
            return Err(AuthError::InvalidCode);
        }
        if !staged.code_is_current(Utc::now()) {
            return Err(AuthError::CodeExpired);
        }

        temp_users.promote(&staged).await.map_err(|e| match e {
            crate::db::RepositoryError::Conflict(_) => AuthError::AccountExists,
            other => AuthError::Repository(other),
        })
    }

    /// Verify credentials and open a session.
    ///
    /// Distinguishes an unknown email (`InvalidCredentials`) from a wrong
    /// password on a known account (`InvalidPassword`).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials`, `AuthError::InvalidPassword`,
    /// or `AuthError::AccountDisabled` for rejected sign-ins.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(User, Session), AuthError> {
        let email = Email::parse(email)?;
        let users = UserRepository::new(self.pool);

        let (user, password_hash) = users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &password_hash).await? {
            return Err(AuthError::InvalidPassword);
        }
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        let session = SessionRepository::new(self.pool).create(user.id).await?;
        users.record_login(user.id).await?;

        Ok((user, session))
    }

    /// Close a session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the delete fails.
    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        SessionRepository::new(self.pool).delete(token).await?;
        Ok(())
    }
}

/// Hash a password with bcrypt off the async runtime.
async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|_| AuthError::PasswordHash)?
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against its bcrypt hash off the async runtime.
async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| AuthError::PasswordHash)?
        .map_err(|_| AuthError::PasswordHash)
}

/// A fresh 6-digit verification code with leading zeros kept.
fn generate_verification_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000))
}

/// When a code issued at `now` stops being accepted.
fn code_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + CODE_TTL
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_code_shape() {
        for _ in 0..100 {
            let code = generate_verification_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_code_expiry_is_fifteen_minutes() {
        let now = Utc::now();
        assert_eq!(code_expiry(now) - now, Duration::minutes(15));
    }

    #[tokio::test]
    async fn test_password_roundtrip() {
        let hash = hash_password("Str0ng!pass").await.unwrap();
        assert!(verify_password("Str0ng!pass", &hash).await.unwrap());
        assert!(!verify_password("wrong-pass", &hash).await.unwrap());
    }
}
