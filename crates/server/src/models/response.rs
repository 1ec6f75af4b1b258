//! The uniform JSON response envelope.
//!
//! Every handler responds with `{success, message?, data?}`. Error responses
//! are produced by `AppError`; success responses by the helpers here.

use serde::{Deserialize, Serialize};

/// The `{success, message?, data?}` envelope every endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome, present on errors and message-only successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload, present on data-carrying successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// A success envelope carrying `data`.
    #[must_use]
    pub const fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiEnvelope<()> {
    /// A success envelope carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// A failure envelope carrying a message. Used by `AppError`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope_omits_message() {
        let envelope = ApiEnvelope::data(serde_json::json!({"count": 3}));
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"success":true,"data":{"count":3}}"#);
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let envelope = ApiEnvelope::message("Signed out");
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"Signed out"}"#);
    }

    #[test]
    fn test_failure_envelope() {
        let envelope = ApiEnvelope::failure("Not authenticated");
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"Not authenticated"}"#);
    }
}
