use crate::helpers::{
    admin_token, empty_request, json_request, make_test_app, register_user, seed_product, user_token,
};
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn dashboard_on_empty_store_is_all_zero() {
    let app = make_test_app().await;
    let admin = admin_token();

    let (status, json) = app.send(empty_request("GET", "/api/dashboard", Some(&admin))).await;

    assert_eq!(status, StatusCode::OK, "{json}");
    let data = &json["data"];
    assert_eq!(data["orders"]["total"], 0);
    assert_eq!(data["orders"]["growth"], 0.0);
    assert_eq!(data["customers"]["total"], 0);
    assert_eq!(data["enquiries"]["total"], 0);
    assert_eq!(data["totalRevenue"], 0.0);
    assert_eq!(data["topProducts"], json!([]));
    assert_eq!(data["topEnquiredProducts"], json!([]));
}

#[tokio::test]
#[serial]
async fn dashboard_counts_todays_activity() {
    let app = make_test_app().await;
    let (_, token) = register_user(&app, "jane@example.com").await;
    let gauge = seed_product(&app.db, "Height Gauge", 100.0).await;
    app.send(json_request(
        "POST",
        "/api/order/place",
        Some(&token),
        json!({
            "items": [{ "productId": gauge.id, "quantity": 3 }],
            "address": {
                "firstName": "Jane", "street": "1 Main St", "city": "Pune",
                "country": "India", "phone": "+91 98765 43210"
            },
            "paymentMethod": "cod"
        }),
    ))
    .await;
    app.send(json_request(
        "POST",
        "/api/enquiry/submit",
        None,
        json!({
            "productId": gauge.id, "productName": "Height Gauge", "email": "b@example.com",
            "quantity": 5, "mobileNo": "+91 98765 43210", "country": "India"
        }),
    ))
    .await;
    let admin = admin_token();

    let (_, json) = app.send(empty_request("GET", "/api/dashboard", Some(&admin))).await;
    let data = &json["data"];

    assert_eq!(data["orders"]["total"], 1);
    assert_eq!(data["orders"]["today"], 1);
    assert_eq!(data["orders"]["yesterday"], 0);
    assert_eq!(data["orders"]["growth"], 0.0);
    assert_eq!(data["customers"]["total"], 1);
    assert_eq!(data["enquiries"]["today"], 1);
    assert_eq!(data["totalRevenue"], 300.0);
    assert_eq!(data["topProducts"][0]["name"], "Height Gauge");
    assert_eq!(data["topProducts"][0]["totalQuantity"], 3);
    assert_eq!(data["topEnquiredProducts"][0]["count"], 1);
}

#[tokio::test]
#[serial]
async fn dashboard_is_admin_only() {
    let app = make_test_app().await;
    let token = user_token(1);

    let (status, _) = app.send(empty_request("GET", "/api/dashboard", Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
