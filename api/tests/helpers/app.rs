use api::auth::{ADMIN_SUBJECT, TOKEN_HEADER, generate_jwt};
use api::routes::app_router;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use util::{config::AppConfig, state::AppState, storage::MediaStorage};

pub const PUBLIC_BASE: &str = "http://localhost:4000";

/// Router over a fresh in-memory database and a throwaway media root.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub media: TempDir,
}

pub async fn make_test_app() -> TestApp {
    AppConfig::set_jwt_secret("integration-test-secret");
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_smtp_username("");
    AppConfig::set_smtp_password("");
    AppConfig::set_user_email("");
    AppConfig::set_frontend_url("https://shop.example.com");

    let db = setup_test_db().await;
    let media = TempDir::new().expect("tempdir");
    let state = AppState::new(db.clone(), MediaStorage::new(media.path(), PUBLIC_BASE));

    TestApp {
        router: app_router(state),
        db,
        media,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    /// Number of files stored under a media folder.
    pub fn stored_files(&self, folder: &str) -> usize {
        std::fs::read_dir(self.media.path().join(folder))
            .map(|dir| dir.count())
            .unwrap_or(0)
    }
}

pub fn admin_token() -> String {
    generate_jwt(ADMIN_SUBJECT, true).unwrap().0
}

pub fn user_token(user_id: i64) -> String {
    generate_jwt(user_id, false).unwrap().0
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::empty()).unwrap()
}

/// Inserts a product directly, bypassing the multipart route.
pub async fn seed_product(db: &DatabaseConnection, name: &str, price: f64) -> db::models::product::Model {
    use services::product_service::{ProductInput, ProductService};

    ProductService::create(
        db,
        ProductInput {
            name: name.to_string(),
            description: format!("{name} for workshop use"),
            price,
            category: "Gauges".into(),
            stock: 10,
            model_number: "DG-100".into(),
            company: "Acme Metrology".into(),
            ..Default::default()
        },
        vec![format!("{PUBLIC_BASE}/uploads/products/seed.png")],
    )
    .await
    .unwrap()
}

/// Registers a storefront user through the API and returns `(id, token)`.
pub async fn register_user(app: &TestApp, email: &str) -> (i64, String) {
    let (status, json) = app
        .send(json_request(
            "POST",
            "/api/user/register",
            None,
            serde_json::json!({ "name": "Jane Buyer", "email": email, "password": "correct-horse" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["token"].as_str().unwrap().to_string(),
    )
}
