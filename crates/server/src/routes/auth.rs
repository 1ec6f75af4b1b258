//! Authentication route handlers.
//!
//! Signup is a three-step exchange (stage, optionally resend, confirm);
//! sign-in installs the session cookie and sign-out clears it. Every
//! response uses the standard envelope.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, clear_sentry_user};
use crate::middleware::{RequireAuth, build_session_cookie, clear_session_cookie};
use crate::models::{ApiEnvelope, TempUser, UserProfile};
use crate::services::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Resend request body.
#[derive(Debug, Deserialize)]
pub struct ResendRequest {
    pub email: String,
}

/// Confirm request body.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub email: String,
    pub code: String,
}

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/signup` - Stage a signup and email a verification code.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }

    let staged = AuthService::new(state.pool())
        .sign_up(
            name,
            &body.email,
            &body.password,
            &client_ip(&headers),
            &user_agent(&headers),
        )
        .await?;

    email_verification_code(&state, &staged).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::<()>::message(
            "Verification code sent, check your email",
        )),
    ))
}

/// `POST /api/auth/signup/resend` - Regenerate and re-email the code.
pub async fn resend_code(
    State(state): State<AppState>,
    Json(body): Json<ResendRequest>,
) -> Result<impl IntoResponse, AppError> {
    let staged = AuthService::new(state.pool())
        .resend_code(&body.email)
        .await?;

    email_verification_code(&state, &staged).await;

    Ok(Json(ApiEnvelope::<()>::message("Verification code resent")))
}

/// `POST /api/auth/signup/confirm` - Confirm the code and create the account.
pub async fn confirm_signup(
    State(state): State<AppState>,
    Json(body): Json<ConfirmRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(state.pool())
        .confirm_signup(&body.email, &body.code)
        .await?;

    tracing::info!(user_id = %user.id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::data(UserProfile::from(&user))),
    ))
}

/// `POST /api/auth/signin` - Verify credentials and install the session cookie.
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, session) = AuthService::new(state.pool())
        .sign_in(&body.email, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "Signed in");

    let cookie = build_session_cookie(&session.token, state.config().is_secure());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiEnvelope::data(UserProfile::from(&user))),
    ))
}

/// `POST /api/auth/signout` - Close the session and clear the cookie.
pub async fn signout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(state.pool())
        .sign_out(&user.session_token)
        .await?;

    clear_sentry_user();

    let cookie = clear_session_cookie(state.config().is_secure());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiEnvelope::<()>::message("Signed out")),
    ))
}

/// `GET /api/auth/me` - The signed-in seller's profile.
pub async fn me(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(ApiEnvelope::data(user))
}

/// Email the current verification code. Delivery failures don't fail the
/// request; the code can be resent.
async fn email_verification_code(state: &AppState, staged: &TempUser) {
    if let Err(e) = state
        .mailer()
        .send_verification_code(staged.email.as_str(), &staged.name, &staged.verification_code)
        .await
    {
        tracing::warn!(error = %e, "Failed to send verification email");
    }
}

fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map_or_else(|| "unknown".to_string(), |ip| ip.trim().to_string())
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map_or_else(|| "unknown".to_string(), String::from)
}
