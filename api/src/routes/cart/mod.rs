//! `/cart`: the signed-in user's server-side cart. Every route needs a token.

pub mod post;

use crate::auth::guards::allow_authenticated;
use axum::{Router, middleware::from_fn, routing::post};
use post::{add_to_cart, get_cart, update_cart};
use util::state::AppState;

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/get", post(get_cart))
        .route("/add", post(add_to_cart))
        .route("/update", post(update_cart))
        .route_layer(from_fn(allow_authenticated))
}
