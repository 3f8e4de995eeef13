use crate::helpers::{admin_token, empty_request, json_request, make_test_app, register_user};
use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

fn enquiry(email: &str) -> Value {
    json!({
        "productId": 1,
        "productName": "Vernier Caliper",
        "email": email,
        "quantity": 25,
        "mobileNo": "+91 98765 43210",
        "country": "India"
    })
}

#[tokio::test]
#[serial]
async fn invalid_email_is_rejected_and_not_stored() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(json_request("POST", "/api/enquiry/submit", None, enquiry("not-an-email")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let admin = admin_token();
    let (_, list) = app.send(empty_request("GET", "/api/enquiry/get", Some(&admin))).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
#[serial]
async fn enquiry_is_stored_even_when_notification_cannot_be_sent() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(json_request("POST", "/api/enquiry/submit", None, enquiry("buyer@example.com")))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["status"], "pending");
    assert!(json["data"]["userId"].is_null());

    let admin = admin_token();
    let (_, list) = app.send(empty_request("GET", "/api/enquiry/get", Some(&admin))).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["email"], "buyer@example.com");
}

#[tokio::test]
#[serial]
async fn enquiry_with_user_token_is_linked_to_user() {
    let app = make_test_app().await;
    let (user_id, token) = register_user(&app, "jane@example.com").await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/enquiry/submit",
            Some(&token),
            enquiry("jane@example.com"),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["userId"], user_id);

    let (_, mine) = app.send(empty_request("GET", "/api/enquiry/mine", Some(&token))).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn zero_quantity_and_bad_mobiles_are_rejected() {
    let app = make_test_app().await;
    let mut zero = enquiry("buyer@example.com");
    zero["quantity"] = json!(0);
    let mut bad_mobile = enquiry("buyer@example.com");
    bad_mobile["mobileNo"] = json!("call me");
    let mut separators_only = enquiry("buyer@example.com");
    separators_only["mobileNo"] = json!("1 () () ()");

    for body in [zero, bad_mobile, separators_only] {
        let (status, _) = app
            .send(json_request("POST", "/api/enquiry/submit", None, body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
#[serial]
async fn admin_updates_enquiry_status() {
    let app = make_test_app().await;
    let (_, created) = app
        .send(json_request("POST", "/api/enquiry/submit", None, enquiry("buyer@example.com")))
        .await;
    let admin = admin_token();
    let id = created["data"]["id"].clone();

    let (status, json) = app
        .send(json_request(
            "PUT",
            "/api/enquiry/update",
            Some(&admin),
            json!({ "id": id, "status": "contacted" }),
        ))
        .await;
    let (bad_status, _) = app
        .send(json_request(
            "PUT",
            "/api/enquiry/update",
            Some(&admin),
            json!({ "id": id, "status": "teleported" }),
        ))
        .await;
    let (missing, _) = app
        .send(json_request(
            "PUT",
            "/api/enquiry/update",
            Some(&admin),
            json!({ "id": 9999, "status": "completed" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "contacted");
    assert_eq!(bad_status, StatusCode::BAD_REQUEST);
    assert_eq!(missing, StatusCode::NOT_FOUND);
}
