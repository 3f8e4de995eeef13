use crate::helpers::{json_request, make_test_app};
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn contact_rejects_invalid_email() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/contact",
            None,
            json!({ "name": "Jane", "email": "nope", "message": "Hello" }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn contact_without_mail_setup_is_500() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/contact",
            None,
            json!({
                "name": "Jane",
                "email": "jane@example.com",
                "subject": "Bulk order",
                "message": "Please call me back."
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
}
