use crate::helpers::{admin_token, json_request, make_test_app, register_user, seed_product};
use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

fn address() -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Buyer",
        "email": "jane@example.com",
        "street": "12 Gauge Lane",
        "city": "Pune",
        "state": "MH",
        "zipcode": "411001",
        "country": "India",
        "phone": "+91 98765 43210"
    })
}

#[tokio::test]
#[serial]
async fn cart_add_and_update() {
    let app = make_test_app().await;
    let (_, token) = register_user(&app, "jane@example.com").await;
    let product = seed_product(&app.db, "Height Gauge", 120.0).await;
    let key = product.id.to_string();

    for _ in 0..2 {
        let (status, _) = app
            .send(json_request("POST", "/api/cart/add", Some(&token), json!({ "itemId": product.id })))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, cart) = app.send(json_request("POST", "/api/cart/get", Some(&token), json!({}))).await;
    assert_eq!(cart["data"][&key], 2);

    let (_, cart) = app
        .send(json_request(
            "POST",
            "/api/cart/update",
            Some(&token),
            json!({ "itemId": product.id, "quantity": 0 }),
        ))
        .await;
    assert!(cart["data"].get(&key).is_none());
}

#[tokio::test]
#[serial]
async fn cart_add_unknown_product_is_404() {
    let app = make_test_app().await;
    let (_, token) = register_user(&app, "jane@example.com").await;

    let (status, _) = app
        .send(json_request("POST", "/api/cart/add", Some(&token), json!({ "itemId": 77 })))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn cart_requires_token() {
    let app = make_test_app().await;

    let (status, _) = app.send(json_request("POST", "/api/cart/get", None, json!({}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn place_order_prices_from_catalogue_and_clears_cart() {
    let app = make_test_app().await;
    let (user_id, token) = register_user(&app, "jane@example.com").await;
    let gauge = seed_product(&app.db, "Height Gauge", 120.0).await;
    let block = seed_product(&app.db, "Slip Gauge Block", 15.25).await;
    app.send(json_request("POST", "/api/cart/add", Some(&token), json!({ "itemId": gauge.id })))
        .await;

    let (status, order) = app
        .send(json_request(
            "POST",
            "/api/order/place",
            Some(&token),
            json!({
                "items": [
                    { "productId": gauge.id, "quantity": 1 },
                    { "productId": block.id, "quantity": 2, "size": "M" }
                ],
                "address": address(),
                "paymentMethod": "cod"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["data"]["amount"], 150.5);
    assert_eq!(order["data"]["userId"], user_id);
    assert_eq!(order["data"]["status"], "Order Placed");
    assert_eq!(order["data"]["payment"], false);
    assert_eq!(order["data"]["items"].as_array().unwrap().len(), 2);

    let (_, cart) = app.send(json_request("POST", "/api/cart/get", Some(&token), json!({}))).await;
    assert_eq!(cart["data"], json!({}));

    let (_, mine) = app
        .send(json_request("POST", "/api/order/userorders", Some(&token), json!({})))
        .await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn place_order_rejects_online_payment_and_missing_address() {
    let app = make_test_app().await;
    let (_, token) = register_user(&app, "jane@example.com").await;
    let gauge = seed_product(&app.db, "Height Gauge", 120.0).await;
    let items = json!([{ "productId": gauge.id, "quantity": 1 }]);

    let (stripe, _) = app
        .send(json_request(
            "POST",
            "/api/order/place",
            Some(&token),
            json!({ "items": items, "address": address(), "paymentMethod": "stripe" }),
        ))
        .await;
    let (no_city, _) = app
        .send(json_request(
            "POST",
            "/api/order/place",
            Some(&token),
            json!({ "items": items, "address": { "firstName": "Jane" }, "paymentMethod": "cod" }),
        ))
        .await;

    assert_eq!(stripe, StatusCode::BAD_REQUEST);
    assert_eq!(no_city, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn admin_lists_orders_and_updates_status() {
    let app = make_test_app().await;
    let (_, token) = register_user(&app, "jane@example.com").await;
    let gauge = seed_product(&app.db, "Height Gauge", 120.0).await;
    let (_, order) = app
        .send(json_request(
            "POST",
            "/api/order/place",
            Some(&token),
            json!({
                "items": [{ "productId": gauge.id, "quantity": 1 }],
                "address": address(),
                "paymentMethod": "cod"
            }),
        ))
        .await;
    let admin = admin_token();

    let (status, updated) = app
        .send(json_request(
            "POST",
            "/api/order/status",
            Some(&admin),
            json!({ "orderId": order["data"]["id"], "status": "Shipped" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "Shipped");

    let (_, all) = app.send(json_request("POST", "/api/order/list", Some(&admin), json!({}))).await;
    assert_eq!(all["data"][0]["status"], "Shipped");

    let (forbidden, _) = app
        .send(json_request("POST", "/api/order/list", Some(&token), json!({})))
        .await;
    assert_eq!(forbidden, StatusCode::FORBIDDEN);
}
