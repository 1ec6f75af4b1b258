//! Integration tests for inventory and orders.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p shoptill-server)
//!
//! Run with: cargo test -p shoptill-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use shoptill_integration_tests::{base_url, signed_in_client};

async fn create_product(
    client: &reqwest::Client,
    sku: &str,
    price: &str,
    quantity: i32,
    low_stock_threshold: i32,
) -> Value {
    let resp = client
        .post(format!("{}/api/inventory", base_url()))
        .json(&json!({
            "name": format!("Product {sku}"),
            "sku": sku,
            "price": price,
            "quantity": quantity,
            "low_stock_threshold": low_stock_threshold,
        }))
        .send()
        .await
        .expect("create product failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["success"], true);
    body["data"].clone()
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_product_crud() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let product = create_product(&client, "SKU-CRUD", "4.50", 10, 3).await;
    let id = product["id"].as_i64().expect("product id");

    let resp = client
        .put(format!("{base}/api/inventory/{id}"))
        .json(&json!({ "price": "5.00", "quantity": 20 }))
        .send()
        .await
        .expect("update product failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["quantity"], 20);

    let resp = client
        .get(format!("{base}/api/inventory"))
        .send()
        .await
        .expect("list products failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    let listed = body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .any(|p| p["id"].as_i64() == Some(id));
    assert!(listed, "created product should appear in the listing");

    let resp = client
        .delete(format!("{base}/api/inventory/{id}"))
        .send()
        .await
        .expect("delete product failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .delete(format!("{base}/api/inventory/{id}"))
        .send()
        .await
        .expect("second delete failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_sku_conflicts() {
    let (client, _email) = signed_in_client().await;

    create_product(&client, "SKU-DUP", "1.00", 1, 1).await;

    let resp = client
        .post(format!("{}/api/inventory", base_url()))
        .json(&json!({
            "name": "Duplicate",
            "sku": "SKU-DUP",
            "price": "2.00",
            "quantity": 2,
        }))
        .send()
        .await
        .expect("duplicate create failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_products_are_tenant_scoped() {
    let (owner, _) = signed_in_client().await;
    let (other, _) = signed_in_client().await;
    let base = base_url();

    let product = create_product(&owner, "SKU-TENANT", "1.00", 5, 1).await;
    let id = product["id"].as_i64().expect("product id");

    // Another seller sees a 404, identical to a nonexistent product.
    let resp = other
        .put(format!("{base}/api/inventory/{id}"))
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .expect("cross-tenant update failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_decrements_stock() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let product = create_product(&client, "SKU-ORDER", "4.50", 10, 3).await;
    let id = product["id"].as_i64().expect("product id");

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer_name": "Walk-in",
            "channel": "pos",
            "items": [
                { "product_id": id, "name": "Product SKU-ORDER", "quantity": 3, "unit_price": "4.50" }
            ],
        }))
        .send()
        .await
        .expect("create order failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["total"], "13.50");

    let resp = client
        .get(format!("{base}/api/inventory"))
        .send()
        .await
        .expect("list products failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    let quantity = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .map(|p| p["quantity"].as_i64())
        .expect("product should still be listed");
    assert_eq!(quantity, Some(7));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_oversell_rejected_and_stock_unchanged() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let product = create_product(&client, "SKU-OVER", "2.00", 2, 1).await;
    let id = product["id"].as_i64().expect("product id");

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer_name": "Greedy",
            "channel": "pos",
            "items": [
                { "product_id": id, "name": "Product SKU-OVER", "quantity": 5, "unit_price": "2.00" }
            ],
        }))
        .send()
        .await
        .expect("oversell order failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = client
        .get(format!("{base}/api/inventory"))
        .send()
        .await
        .expect("list products failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    let quantity = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .map(|p| p["quantity"].as_i64())
        .expect("product should still be listed");
    assert_eq!(quantity, Some(2), "rejected order must not touch stock");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_negative_item_price_rejected() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer_name": "Refund Abuser",
            "channel": "pos",
            "items": [
                { "product_id": null, "name": "Discount", "quantity": 1, "unit_price": "-100.00" }
            ],
        }))
        .send()
        .await
        .expect("create order failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // A negative line never reaches the books.
    let resp = client
        .get(format!("{base}/api/orders/stats"))
        .send()
        .await
        .expect("order stats failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["total_orders"], 0);
    assert_eq!(body["data"]["revenue"], "0");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_blank_item_name_rejected() {
    let (client, _email) = signed_in_client().await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({
            "customer_name": "Blank Line",
            "channel": "pos",
            "items": [
                { "product_id": null, "name": "  ", "quantity": 1, "unit_price": "1.00" }
            ],
        }))
        .send()
        .await
        .expect("create order failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_status_transition_and_filter() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer_name": "Filter Test",
            "channel": "online",
            "items": [
                { "product_id": null, "name": "Custom item", "quantity": 1, "unit_price": "9.99" }
            ],
        }))
        .send()
        .await
        .expect("create order failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("invalid JSON");
    let id = body["data"]["id"].as_i64().expect("order id");

    let resp = client
        .patch(format!("{base}/api/orders/{id}/status"))
        .json(&json!({ "status": "paid" }))
        .send()
        .await
        .expect("status update failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["data"]["status"], "paid");

    let resp = client
        .get(format!("{base}/api/orders?status=paid"))
        .send()
        .await
        .expect("filtered list failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid JSON");
    let found = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .any(|o| o["id"].as_i64() == Some(id));
    assert!(found, "paid order should match the status filter");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_raises_notifications() {
    let (client, _email) = signed_in_client().await;
    let base = base_url();

    // Ordering 4 of 5 leaves 1, which is at the threshold.
    let product = create_product(&client, "SKU-NOTIF", "1.00", 5, 1).await;
    let id = product["id"].as_i64().expect("product id");

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&json!({
            "customer_name": "Notif Test",
            "channel": "pos",
            "items": [
                { "product_id": id, "name": "Product SKU-NOTIF", "quantity": 4, "unit_price": "1.00" }
            ],
        }))
        .send()
        .await
        .expect("create order failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{base}/api/notifications"))
        .send()
        .await
        .expect("list notifications failed");
    let body: Value = resp.json().await.expect("invalid JSON");
    let kinds: Vec<&str> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|n| n["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"order"), "order notification expected");
    assert!(kinds.contains(&"low_stock"), "low-stock notification expected");
}
