//! `/order`: checkout for users, order administration for admins.

pub mod post;

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{Router, middleware::from_fn, routing::post};
use post::{list_orders, place_order, update_status, user_orders};
use util::state::AppState;

/// - `POST /order/place`, `POST /order/userorders` (user token)
/// - `POST /order/list`, `POST /order/status` (admin)
pub fn order_routes() -> Router<AppState> {
    let user = Router::new()
        .route("/place", post(place_order))
        .route("/userorders", post(user_orders))
        .route_layer(from_fn(allow_authenticated));

    let admin = Router::new()
        .route("/list", post(list_orders))
        .route("/status", post(update_status))
        .route_layer(from_fn(allow_admin));

    user.merge(admin)
}
