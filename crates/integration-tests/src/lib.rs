//! Integration tests for Shoptill.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p shoptill-cli -- migrate
//!
//! # Start the server
//! cargo run -p shoptill-server
//!
//! # Run the (ignored-by-default) integration tests
//! cargo test -p shoptill-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP with a cookie-holding reqwest
//! client. Each test signs up its own throwaway account so tests don't
//! share state.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOPTILL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client that keeps its session cookie between requests.
///
/// # Panics
///
/// Panics if the HTTP client fails to build.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique throwaway email address for one test run.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@shoptill-tests.example", Uuid::new_v4().simple())
}

/// Password that satisfies every strength rule.
pub const TEST_PASSWORD: &str = "Str0ng!pass";

/// Sign up, read the verification code straight from the database, confirm,
/// and sign in. Returns the signed-in client and the account email.
///
/// # Panics
///
/// Panics if any step of the flow fails; these helpers run only inside
/// ignored integration tests against a live server.
pub async fn signed_in_client() -> (Client, String) {
    let client = client();
    let email = unique_email();
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/auth/signup"))
        .json(&json!({
            "name": "Integration Test",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("signup request failed");
    assert_eq!(resp.status(), 201, "signup should succeed");

    let code = verification_code(&email).await;

    let resp = client
        .post(format!("{base}/api/auth/signup/confirm"))
        .json(&json!({ "email": email, "code": code }))
        .send()
        .await
        .expect("confirm request failed");
    assert_eq!(resp.status(), 201, "confirm should succeed");

    let resp = client
        .post(format!("{base}/api/auth/signin"))
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("signin request failed");
    assert_eq!(resp.status(), 200, "signin should succeed");

    (client, email)
}

/// Read the pending verification code for `email` from the database.
///
/// # Panics
///
/// Panics if the database is unreachable or no signup is pending.
pub async fn verification_code(email: &str) -> String {
    let database_url = std::env::var("SHOPTILL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("SHOPTILL_DATABASE_URL must be set for integration tests");

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::query_scalar("SELECT verification_code FROM temp_users WHERE email = $1")
        .bind(email)
        .fetch_one(&pool)
        .await
        .expect("No pending signup for email")
}

/// Extract the `session=<token>` pair from a signin response's `Set-Cookie`
/// headers, suitable for replaying in a raw `Cookie` header.
///
/// # Panics
///
/// Panics if no session cookie was set.
#[must_use]
pub fn session_cookie(resp: &reqwest::Response) -> String {
    resp.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .expect("signin should set the session cookie")
        .split(';')
        .next()
        .expect("cookie should have a name=value pair")
        .to_string()
}

/// Assert the standard failure envelope and return its message.
///
/// # Panics
///
/// Panics if the body is not a failure envelope.
#[must_use]
pub fn failure_message(body: &Value) -> &str {
    assert_eq!(body["success"], false, "expected failure envelope: {body}");
    body["message"].as_str().expect("message should be a string")
}
