use crate::helpers::{
    MultipartBody, admin_token, empty_request, json_request, make_test_app, seed_product,
};
use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

fn product_form(name: &str) -> MultipartBody {
    MultipartBody::new()
        .text("name", name)
        .text("description", "0-10mm dial gauge")
        .text("price", "49.5")
        .text("category", "Gauges")
        .text("stock", "12")
        .text("model", "DG-10")
        .text("company", "Acme Metrology")
        .text("specifications", r#"[{"key":"Range","value":"0-10mm"}]"#)
        .text("features", r#"["Shockproof"]"#)
}

#[tokio::test]
#[serial]
async fn add_product_allocates_unique_slugs_for_duplicate_names() {
    let app = make_test_app().await;
    let token = admin_token();

    let (first_status, first) = app
        .send(
            product_form("Dial Gauge")
                .file("image1", "a.png", "image/png", PNG)
                .into_request("POST", "/api/product/add", Some(&token)),
        )
        .await;
    let (second_status, second) = app
        .send(
            product_form("Dial Gauge")
                .file("image1", "b.png", "image/png", PNG)
                .into_request("POST", "/api/product/add", Some(&token)),
        )
        .await;

    assert_eq!(first_status, StatusCode::CREATED, "{first}");
    assert_eq!(second_status, StatusCode::CREATED, "{second}");
    assert_eq!(first["data"]["slug"], "dial-gauge");
    assert_eq!(second["data"]["slug"], "dial-gauge-1");
    assert_eq!(first["data"]["specifications"][0]["key"], "Range");
    assert_eq!(app.stored_files("products"), 2);

    let (status, by_slug) = app
        .send(empty_request("GET", "/api/product/slug/dial-gauge-1", None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["data"]["id"], second["data"]["id"]);
}

#[tokio::test]
#[serial]
async fn add_product_without_image_is_rejected() {
    let app = make_test_app().await;
    let token = admin_token();

    let (status, _) = app
        .send(product_form("Caliper").into_request("POST", "/api/product/add", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, list) = app.send(empty_request("GET", "/api/product/list", None)).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
#[serial]
async fn add_product_rejects_non_image_upload_without_storing() {
    let app = make_test_app().await;
    let token = admin_token();

    let (status, _) = app
        .send(
            product_form("Caliper")
                .file("image1", "notes.txt", "text/plain", b"hello")
                .into_request("POST", "/api/product/add", Some(&token)),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_files("products"), 0);
}

#[tokio::test]
#[serial]
async fn repeated_image_fields_store_one_file_each() {
    let app = make_test_app().await;
    let token = admin_token();

    let mut form = product_form("Bore Gauge");
    for i in 0..6 {
        form = form.file("image1", &format!("copy{i}.png"), "image/png", PNG);
    }
    let (status, json) = app
        .send(
            form.file("image2", "side.png", "image/png", PNG)
                .into_request("POST", "/api/product/add", Some(&token)),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["image"].as_array().unwrap().len(), 2);
    assert_eq!(app.stored_files("products"), 2);
}

#[tokio::test]
#[serial]
async fn remove_missing_product_is_404() {
    let app = make_test_app().await;
    let token = admin_token();

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/product/remove",
            Some(&token),
            json!({ "id": 4242 }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn update_field_changes_price_and_stock() {
    let app = make_test_app().await;
    let token = admin_token();
    let product = seed_product(&app.db, "Micrometer", 80.0).await;

    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/product/update-field",
            Some(&token),
            json!({ "id": product.id, "field": "stock", "value": 3 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stock"], 3);
}

#[tokio::test]
#[serial]
async fn update_field_rejects_other_fields_and_negative_values() {
    let app = make_test_app().await;
    let token = admin_token();
    let product = seed_product(&app.db, "Micrometer", 80.0).await;

    for body in [
        json!({ "id": product.id, "field": "name", "value": 1 }),
        json!({ "id": product.id, "field": "price", "value": -5 }),
        json!({ "id": product.id, "field": "stock", "value": 2.5 }),
    ] {
        let (status, _) = app
            .send(json_request("POST", "/api/product/update-field", Some(&token), body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, single) = app
        .send(json_request(
            "POST",
            "/api/product/single",
            None,
            json!({ "productId": product.id }),
        ))
        .await;
    assert_eq!(single["data"]["price"], 80.0);
    assert_eq!(single["data"]["stock"], 10);
}

#[tokio::test]
#[serial]
async fn update_field_on_missing_product_is_404() {
    let app = make_test_app().await;
    let token = admin_token();

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/product/update-field",
            Some(&token),
            json!({ "id": 999, "field": "price", "value": 10 }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
