use crate::helpers::{json_request, make_test_app, register_user};
use api::auth::decode_jwt;
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;
use util::config::AppConfig;

#[tokio::test]
#[serial]
async fn register_returns_token_for_new_user() {
    let app = make_test_app().await;

    let (id, token) = register_user(&app, "jane@example.com").await;

    let claims = decode_jwt(&token).unwrap();
    assert_eq!(claims.sub, id);
    assert!(!claims.admin);
}

#[tokio::test]
#[serial]
async fn register_rejects_duplicate_email() {
    let app = make_test_app().await;
    register_user(&app, "jane@example.com").await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/user/register",
            None,
            json!({ "name": "Other", "email": "jane@example.com", "password": "another-pass" }),
        ))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn register_rejects_short_password() {
    let app = make_test_app().await;

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/user/register",
            None,
            json!({ "name": "Jane", "email": "jane@example.com", "password": "short" }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn login_checks_password() {
    let app = make_test_app().await;
    register_user(&app, "jane@example.com").await;

    let (ok_status, ok_json) = app
        .send(json_request(
            "POST",
            "/api/user/login",
            None,
            json!({ "email": "jane@example.com", "password": "correct-horse" }),
        ))
        .await;
    let (bad_status, _) = app
        .send(json_request(
            "POST",
            "/api/user/login",
            None,
            json!({ "email": "jane@example.com", "password": "wrong-horse" }),
        ))
        .await;

    assert_eq!(ok_status, StatusCode::OK);
    assert!(ok_json["data"]["token"].is_string());
    assert_eq!(bad_status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn admin_login_uses_configured_credentials() {
    let app = make_test_app().await;
    AppConfig::set_admin_email("admin@store.test");
    AppConfig::set_admin_password("s3cret-admin");

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/user/admin",
            None,
            json!({ "email": "Admin@Store.test", "password": "s3cret-admin" }),
        ))
        .await;
    let (bad_status, _) = app
        .send(json_request(
            "POST",
            "/api/user/admin",
            None,
            json!({ "email": "admin@store.test", "password": "guess" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["admin"], true);
    let claims = decode_jwt(json["data"]["token"].as_str().unwrap()).unwrap();
    assert!(claims.admin);
    assert_eq!(bad_status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn chat_answers_from_faq() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/user/chat",
            None,
            json!({ "message": "Do you provide a calibration certificate?" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["source"], "faq");
}

#[tokio::test]
#[serial]
async fn chat_rejects_blank_message() {
    let app = make_test_app().await;

    let (status, _) = app
        .send(json_request("POST", "/api/user/chat", None, json!({ "message": "   " })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
