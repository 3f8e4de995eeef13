//! `/dashboard`: admin statistics plus the careers, testimonials and news
//! content managed from the admin panel and read by the storefront.

pub mod careers;
pub mod get;
pub mod news;
pub mod testimonials;

use crate::auth::guards::allow_admin;
use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

/// - `GET /dashboard` (admin) → `get::dashboard_stats`
/// - `/dashboard/careers`, `/dashboard/testimonials`, `/dashboard/news`
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::dashboard_stats).route_layer(from_fn(allow_admin)))
        .nest("/careers", careers::careers_routes())
        .nest("/testimonials", testimonials::testimonial_routes())
        .nest("/news", news::news_routes())
}
