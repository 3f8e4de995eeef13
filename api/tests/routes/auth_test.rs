use crate::helpers::{admin_token, empty_request, json_request, make_test_app, user_token};
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn admin_route_without_token_is_401() {
    let app = make_test_app().await;

    let (status, json) = app.send(empty_request("GET", "/api/enquiry/get", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn admin_route_with_user_token_is_403() {
    let app = make_test_app().await;
    let token = user_token(7);

    let (status, json) = app
        .send(empty_request("GET", "/api/enquiry/get", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Admin access required");
}

#[tokio::test]
#[serial]
async fn malformed_token_is_401() {
    let app = make_test_app().await;

    let (status, _) = app
        .send(empty_request("POST", "/api/cart/get", Some("not-a-jwt")))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn admin_token_passes_admin_guard() {
    let app = make_test_app().await;
    let token = admin_token();

    let (status, json) = app
        .send(empty_request("GET", "/api/enquiry/get", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
#[serial]
async fn product_writes_require_admin() {
    let app = make_test_app().await;
    let token = user_token(3);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/product/remove",
            Some(&token),
            json!({ "id": 1 }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
