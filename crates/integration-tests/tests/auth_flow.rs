//! Integration tests for the signup and session lifecycle.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p shoptill-server)
//!
//! Run with: cargo test -p shoptill-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use shoptill_integration_tests::{
    TEST_PASSWORD, base_url, client, failure_message, session_cookie, signed_in_client,
    unique_email, verification_code,
};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_confirm_signin_flow() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Integration Test");
    // The session token never appears in the profile payload.
    assert!(body["data"].get("session_token").is_none());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_me_without_cookie_is_unauthenticated() {
    let resp = client()
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("me request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(failure_message(&body), "Not authenticated");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signin_wrong_password() {
    let (_client, email) = signed_in_client().await;

    let resp = client()
        .post(format!("{}/api/auth/signin", base_url()))
        .json(&json!({ "email": email, "password": "Wr0ng!pass" }))
        .send()
        .await
        .expect("signin request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(failure_message(&body), "Invalid password");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signin_unknown_email() {
    let resp = client()
        .post(format!("{}/api/auth/signin", base_url()))
        .json(&json!({ "email": unique_email(), "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("signin request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(failure_message(&body), "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signout_invalidates_session() {
    let (jar_client, email) = signed_in_client().await;
    let base = base_url();

    // Sign in once more to capture the raw token; the jar takes the new
    // cookie, so signout below deletes exactly this session.
    let resp = jar_client
        .post(format!("{base}/api/auth/signin"))
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("signin request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    // The raw token authenticates before signout.
    let resp = client()
        .get(format!("{base}/api/auth/me"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = jar_client
        .post(format!("{base}/api/auth/signout"))
        .send()
        .await
        .expect("signout request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Replaying the captured token bypasses the cleared cookie jar; it must
    // fail because the session row itself is gone.
    let resp = client()
        .get(format!("{base}/api/auth/me"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(failure_message(&body), "Not authenticated");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_signup_conflicts() {
    let client = client();
    let email = unique_email();
    let base = base_url();

    let signup = json!({
        "name": "Dup Test",
        "email": email,
        "password": TEST_PASSWORD,
    });

    let resp = client
        .post(format!("{base}/api/auth/signup"))
        .json(&signup)
        .send()
        .await
        .expect("signup request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/api/auth/signup"))
        .json(&signup)
        .send()
        .await
        .expect("second signup request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_against_confirmed_account_conflicts() {
    // A confirmed, permanent account; not just a pending signup.
    let (_client, email) = signed_in_client().await;

    let resp = client()
        .post(format!("{}/api/auth/signup", base_url()))
        .json(&json!({
            "name": "Second Try",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("signup request failed");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(
        failure_message(&body),
        "An account with this email already exists"
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_weak_password_rejected() {
    let resp = client()
        .post(format!("{}/api/auth/signup", base_url()))
        .json(&json!({
            "name": "Weak Test",
            "email": unique_email(),
            "password": "short",
        }))
        .send()
        .await
        .expect("signup request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert!(failure_message(&body).contains("at least 8 characters"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_resend_budget_caps_at_five() {
    let client = client();
    let email = unique_email();
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/auth/signup"))
        .json(&json!({
            "name": "Resend Test",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("signup request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    for _ in 0..5 {
        let resp = client
            .post(format!("{base}/api/auth/signup/resend"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .expect("resend request failed");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .post(format!("{base}/api/auth/signup/resend"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("sixth resend request failed");
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_confirm_with_wrong_code() {
    let client = client();
    let email = unique_email();
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/auth/signup"))
        .json(&json!({
            "name": "Code Test",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("signup request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let real_code = verification_code(&email).await;
    let wrong_code = if real_code == "000000" { "000001" } else { "000000" };

    let resp = client
        .post(format!("{base}/api/auth/signup/confirm"))
        .json(&json!({ "email": email, "code": wrong_code }))
        .send()
        .await
        .expect("confirm request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
