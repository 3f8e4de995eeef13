use crate::helpers::{MultipartBody, admin_token, empty_request, make_test_app};
use axum::http::StatusCode;
use serial_test::serial;

const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

fn testimonial_form(stars: &str) -> MultipartBody {
    MultipartBody::new()
        .text("name", "Anita Shah")
        .text("position", "QA Manager")
        .text("content", "Accurate instruments and quick delivery.")
        .text("stars", stars)
}

fn news_form() -> MultipartBody {
    MultipartBody::new()
        .text("title", "Metrology Expo 2025")
        .text("description", "Visit our stall for live demos.")
        .text("date", "2025-11-12")
        .text("time", "10:00")
        .text("location", "Mumbai")
        .text("category", "Exhibition")
}

#[tokio::test]
#[serial]
async fn testimonial_with_image_is_created_and_listed() {
    let app = make_test_app().await;
    let admin = admin_token();

    let (status, json) = app
        .send(
            testimonial_form("5")
                .file("image", "anita.jpg", "image/jpeg", JPEG)
                .into_request("POST", "/api/dashboard/testimonials", Some(&admin)),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["stars"], 5);
    assert!(json["data"]["image"].as_str().unwrap().contains("/uploads/testimonials/"));
    assert_eq!(app.stored_files("testimonials"), 1);

    let (_, list) = app
        .send(empty_request("GET", "/api/dashboard/testimonials", None))
        .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn testimonial_stars_out_of_range_is_rejected_without_storing() {
    let app = make_test_app().await;
    let admin = admin_token();

    let (status, _) = app
        .send(
            testimonial_form("6")
                .file("image", "anita.jpg", "image/jpeg", JPEG)
                .into_request("POST", "/api/dashboard/testimonials", Some(&admin)),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_files("testimonials"), 0);
}

#[tokio::test]
#[serial]
async fn testimonial_delete_removes_image() {
    let app = make_test_app().await;
    let admin = admin_token();
    let (_, created) = app
        .send(
            testimonial_form("4")
                .file("image", "anita.jpg", "image/jpeg", JPEG)
                .into_request("POST", "/api/dashboard/testimonials", Some(&admin)),
        )
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .send(empty_request("DELETE", &format!("/api/dashboard/testimonials/{id}"), Some(&admin)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stored_files("testimonials"), 0);
}

#[tokio::test]
#[serial]
async fn news_requires_an_image() {
    let app = make_test_app().await;
    let admin = admin_token();

    let (status, _) = app
        .send(news_form().into_request("POST", "/api/dashboard/news", Some(&admin)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn news_update_replaces_images() {
    let app = make_test_app().await;
    let admin = admin_token();
    let (status, created) = app
        .send(
            news_form()
                .file("images", "a.jpg", "image/jpeg", JPEG)
                .file("images", "b.jpg", "image/jpeg", JPEG)
                .into_request("POST", "/api/dashboard/news", Some(&admin)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(app.stored_files("news"), 2);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, updated) = app
        .send(
            news_form()
                .file("images", "c.jpg", "image/jpeg", JPEG)
                .into_request("PUT", &format!("/api/dashboard/news/{id}"), Some(&admin)),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["data"]["image"].as_array().unwrap().len(), 1);
    assert_eq!(app.stored_files("news"), 1);

    let (status, single) = app
        .send(empty_request("GET", &format!("/api/dashboard/news/{id}"), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(single["data"]["title"], "Metrology Expo 2025");
}

#[tokio::test]
#[serial]
async fn news_writes_require_admin() {
    let app = make_test_app().await;

    let (status, _) = app
        .send(
            news_form()
                .file("images", "a.jpg", "image/jpeg", JPEG)
                .into_request("POST", "/api/dashboard/news", None),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.stored_files("news"), 0);
}
