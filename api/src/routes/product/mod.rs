//! `/product`: public catalogue reads and admin-only writes.

pub mod get;
pub mod post;

use crate::auth::guards::allow_admin;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use get::{list_products, product_by_slug};
use post::{add_product, edit_product, remove_product, single_product, update_field};
use util::state::AppState;

/// - `GET /product/list`, `GET /product/slug/{slug}`, `POST /product/single` (public)
/// - `POST /product/add`, `/edit`, `/remove`, `/update-field` (admin)
pub fn product_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/add", post(add_product))
        .route("/edit", post(edit_product))
        .route("/remove", post(remove_product))
        .route("/update-field", post(update_field))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/list", get(list_products))
        .route("/slug/{slug}", get(product_by_slug))
        .route("/single", post(single_product))
        .merge(admin)
}
