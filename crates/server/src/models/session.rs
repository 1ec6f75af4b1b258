//! Session domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shoptill_core::{Email, UserId, UserRole};

/// A persisted session: an opaque token tied to a user and an expiry.
///
/// A session authenticates a request iff it is looked up by exact token match
/// AND the current time is before `expires_at`. Expired rows may remain in
/// the database; lookups filter them out at read time.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque URL-safe token. Unique and unguessable.
    pub token: String,
    /// Owning user.
    pub user_id: UserId,
    /// When the session was issued.
    pub issued_at: DateTime<Utc>,
    /// When the session stops authenticating requests.
    pub expires_at: DateTime<Utc>,
}

/// The authenticated identity resolved from a session cookie.
///
/// Carries the token so sign-out can delete the session it arrived on.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// User's database ID. The ownership key every query is scoped by.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
    /// The session token this identity was resolved from.
    #[serde(skip)]
    pub session_token: String,
}
