use crate::helpers::{empty_request, make_test_app};
use axum::http::StatusCode;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn health_check_returns_ok_json() {
    let app = make_test_app().await;

    let (status, json) = app.send(empty_request("GET", "/api/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}

#[tokio::test]
#[serial]
async fn unknown_route_is_404() {
    let app = make_test_app().await;

    let (status, _) = app.send(empty_request("GET", "/api/nope", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
