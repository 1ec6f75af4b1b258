//! Authentication extractors.
//!
//! Handlers declare their auth requirement in their signature: `RequireAuth`
//! rejects unauthenticated requests with a 401 envelope. The `session` cookie
//! is resolved against the database on every request, so a deleted or expired
//! session stops authenticating immediately.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};

use super::session::parse_session_cookie;
use crate::db::SessionRepository;
use crate::models::{ApiEnvelope, CurrentUser};
use crate::state::AppState;

/// Extractor that requires a signed-in seller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for requests that fail authentication.
pub enum AuthRejection {
    /// No valid session cookie.
    Unauthenticated,
    /// Session lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ApiEnvelope::<()>::failure("Not authenticated")),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiEnvelope::<()>::failure("Internal server error")),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            parse_session_cookie(&parts.headers).ok_or(AuthRejection::Unauthenticated)?;

        let user = SessionRepository::new(state.pool())
            .find_valid(&token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Session lookup failed");
                AuthRejection::Internal
            })?
            .ok_or(AuthRejection::Unauthenticated)?;

        crate::error::set_sentry_user(&user.id, Some(user.email.as_str()));

        Ok(Self(user))
    }
}
