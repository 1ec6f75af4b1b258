//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shoptill_core::EmailError),

    /// Password failed one or more strength rules.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// A permanent account already exists for the email.
    #[error("account already exists")]
    AccountExists,

    /// A signup is already pending for the email.
    #[error("signup already pending")]
    SignupAlreadyPending,

    /// No pending signup for the email.
    #[error("no pending signup")]
    SignupNotFound,

    /// The resend budget for the pending signup is used up.
    #[error("resend budget exhausted")]
    ResendBudgetExhausted,

    /// The submitted verification code doesn't match.
    #[error("invalid verification code")]
    InvalidCode,

    /// The verification code has expired.
    #[error("verification code expired")]
    CodeExpired,

    /// No account for the email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account exists but the password is wrong.
    #[error("invalid password")]
    InvalidPassword,

    /// Account exists but has been deactivated.
    #[error("account disabled")]
    AccountDisabled,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
