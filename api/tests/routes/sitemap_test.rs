use crate::helpers::{empty_request, make_test_app, seed_product};
use axum::{
    body::to_bytes,
    http::{StatusCode, header::CONTENT_TYPE},
};
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn sitemap_lists_static_pages_and_products() {
    let app = make_test_app().await;
    seed_product(&app.db, "Dial Gauge", 49.0).await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/sitemap.xml", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/xml"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let xml = String::from_utf8(body.to_vec()).unwrap();
    assert!(xml.contains("<loc>https://shop.example.com/</loc>"));
    assert!(xml.contains("<loc>https://shop.example.com/product/dial-gauge</loc>"));
}

#[tokio::test]
#[serial]
async fn uploaded_files_are_served() {
    let app = make_test_app().await;
    std::fs::create_dir_all(app.media.path().join("news")).unwrap();
    std::fs::write(app.media.path().join("news/pic.jpg"), b"jpeg-bytes").unwrap();

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/uploads/news/pic.jpg", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"jpeg-bytes");
}
