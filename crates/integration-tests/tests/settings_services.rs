//! Integration tests for store settings, the service catalog, and the
//! notification feed.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p shoptill-server)
//!
//! Run with: cargo test -p shoptill-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use shoptill_integration_tests::{base_url, signed_in_client};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_settings_upsert_roundtrip() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    // Fresh account has no settings row yet.
    let resp = client
        .get(format!("{base}/api/settings/store"))
        .send()
        .await
        .expect("get settings failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .put(format!("{base}/api/settings/store"))
        .json(&json!({
            "store_name": "Corner Shop",
            "tagline": "Everything local",
            "currency": "gbp",
        }))
        .send()
        .await
        .expect("save settings failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["store_name"], "Corner Shop");
    // Currency is normalised to upper case.
    assert_eq!(body["data"]["currency"], "GBP");

    // Second save goes through the same upsert path.
    let resp = client
        .put(format!("{base}/api/settings/store"))
        .json(&json!({ "store_name": "Corner Shop 2", "currency": "GBP" }))
        .send()
        .await
        .expect("second save failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["store_name"], "Corner Shop 2");
    // Absent optional fields overwrite with null.
    assert_eq!(body["data"]["tagline"], Value::Null);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_settings_reject_bad_currency() {
    let (client, _email) = signed_in_client().await;

    let resp = client
        .put(format!("{}/api/settings/store", base_url()))
        .json(&json!({ "store_name": "Shop", "currency": "pounds" }))
        .send()
        .await
        .expect("save settings failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_service_crud() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/services"))
        .json(&json!({
            "name": "Watch repair",
            "description": "Battery and strap replacement",
            "price": "25.00",
            "duration_minutes": 30,
        }))
        .send()
        .await
        .expect("create service failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("invalid JSON");
    let id = body["data"]["id"].as_i64().expect("service id");

    let resp = client
        .put(format!("{base}/api/services/{id}"))
        .json(&json!({ "price": "30.00", "is_active": false }))
        .send()
        .await
        .expect("update service failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["is_active"], false);

    let resp = client
        .delete(format!("{base}/api/services/{id}"))
        .send()
        .await
        .expect("delete service failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .delete(format!("{base}/api/services/{id}"))
        .send()
        .await
        .expect("second delete failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_notification_read_lifecycle() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    // Place an item-less order to raise one notification.
    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer_name": "Feed Test",
            "channel": "pos",
            "items": [
                { "product_id": null, "name": "Custom", "quantity": 1, "unit_price": "1.00" }
            ],
        }))
        .send()
        .await
        .expect("create order failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{base}/api/notifications/unread-count"))
        .send()
        .await
        .expect("unread count failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["unread"], 1);

    let resp = client
        .get(format!("{base}/api/notifications"))
        .send()
        .await
        .expect("list notifications failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    let id = body["data"][0]["id"].as_i64().expect("notification id");

    let resp = client
        .patch(format!("{base}/api/notifications/{id}/read"))
        .send()
        .await
        .expect("mark read failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/api/notifications/unread-count"))
        .send()
        .await
        .expect("unread count failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["unread"], 0);

    let resp = client
        .delete(format!("{base}/api/notifications/{id}"))
        .send()
        .await
        .expect("delete notification failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/api/notifications"))
        .send()
        .await
        .expect("list notifications failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    assert!(body["data"].as_array().expect("array").is_empty());
}
