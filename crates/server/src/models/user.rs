//! User and signup-staging domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shoptill_core::{Email, SubscriptionId, TempUserId, UserId, UserRole};

/// A permanent seller account (domain type).
///
/// Created only by promoting a confirmed [`TempUser`]; never hard-deleted
/// (deactivation flips `is_active`).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
    /// Soft-deactivation flag.
    pub is_active: bool,
    /// Last successful sign-in, if any.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Current subscription, if any.
    pub current_subscription_id: Option<SubscriptionId>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Public profile fields returned to clients.
///
/// Never carries the password hash or internal flags.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// A staged signup awaiting email-code confirmation (domain type).
///
/// Holds the candidate profile and abuse-tracking metadata. Promoted to a
/// [`User`] when the verification code is confirmed; the staging row is
/// deleted in the same transaction.
#[derive(Debug, Clone)]
pub struct TempUser {
    /// Staging record ID.
    pub id: TempUserId,
    /// Candidate display name.
    pub name: String,
    /// Candidate email (unique among pending signups).
    pub email: Email,
    /// bcrypt hash of the candidate password.
    pub password_hash: String,
    /// Current verification code.
    pub verification_code: String,
    /// When the current code stops being accepted.
    pub code_expires_at: DateTime<Utc>,
    /// How many times the code has been resent.
    pub resend_count: i32,
    /// Origin IP of the signup request.
    pub request_ip: String,
    /// User agent of the signup request.
    pub user_agent: String,
    /// When the signup was staged.
    pub created_at: DateTime<Utc>,
}

impl TempUser {
    /// Maximum number of code resends per staged signup.
    pub const MAX_RESENDS: i32 = 5;

    /// Whether another resend is permitted.
    #[must_use]
    pub const fn can_resend_code(&self) -> bool {
        self.resend_count < Self::MAX_RESENDS
    }

    /// Whether the current code is still accepted at `now`.
    #[must_use]
    pub fn code_is_current(&self, now: DateTime<Utc>) -> bool {
        now < self.code_expires_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn temp_user(resend_count: i32) -> TempUser {
        TempUser {
            id: TempUserId::new(1),
            name: "Corner Shop".to_string(),
            email: Email::parse("owner@corner-shop.example").unwrap(),
            password_hash: "$2b$12$hash".to_string(),
            verification_code: "123456".to_string(),
            code_expires_at: Utc::now() + Duration::minutes(15),
            resend_count,
            request_ip: "203.0.113.9".to_string(),
            user_agent: "test-agent".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_resend_under_cap() {
        assert!(temp_user(0).can_resend_code());
        assert!(temp_user(4).can_resend_code());
    }

    #[test]
    fn test_cannot_resend_at_cap() {
        assert!(!temp_user(5).can_resend_code());
        assert!(!temp_user(6).can_resend_code());
    }

    #[test]
    fn test_code_expiry() {
        let staged = temp_user(0);
        assert!(staged.code_is_current(Utc::now()));
        assert!(!staged.code_is_current(Utc::now() + Duration::minutes(16)));
    }

    #[test]
    fn test_profile_has_no_password_hash() {
        let user = User {
            id: UserId::new(1),
            name: "Corner Shop".to_string(),
            email: Email::parse("owner@corner-shop.example").unwrap(),
            role: UserRole::Seller,
            is_active: true,
            last_login_at: None,
            current_subscription_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("is_active").is_none());
        assert_eq!(json["email"], "owner@corner-shop.example");
    }
}
