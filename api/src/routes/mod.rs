//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/user` → registration, login, admin login, chat assistant
//! - `/product` → catalogue reads (public) and management (admin)
//! - `/cart` → the signed-in user's cart
//! - `/order` → checkout and order history; listing and status (admin)
//! - `/enquiry` → bulk enquiries
//! - `/dashboard` → admin statistics plus careers, testimonials and news
//! - `/careers` → job applications
//! - `/contact` → contact form relay
//!
//! Uploaded media is served from [`UPLOADS_MOUNT`] and the sitemap from `/sitemap.xml`,
//! both outside the `/api` prefix.

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::services::ServeDir;
use util::{state::AppState, storage::UPLOADS_MOUNT};

pub mod careers;
pub mod cart;
pub mod common;
pub mod contact;
pub mod dashboard;
pub mod enquiry;
pub mod health;
pub mod order;
pub mod product;
pub mod sitemap;
pub mod user;

/// Largest accepted request body. Covers four product images at their limit.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Builds the `/api` router. All groups share `AppState`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/user", user::user_routes())
        .nest("/product", product::product_routes())
        .nest("/cart", cart::cart_routes())
        .nest("/order", order::order_routes())
        .nest("/enquiry", enquiry::enquiry_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .nest("/careers", careers::careers_routes())
        .nest("/contact", contact::contact_routes())
}

/// The full application: `/api`, `/sitemap.xml` and the uploads mount.
///
/// Request logging and CORS are added by the binary.
pub fn app_router(app_state: AppState) -> Router {
    let uploads = ServeDir::new(app_state.storage().root());

    Router::new()
        .nest("/api", routes())
        .route("/sitemap.xml", get(sitemap::sitemap))
        .nest_service(UPLOADS_MOUNT, uploads)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}
