use crate::auth::AuthUser;
use crate::response::{created, error_response, ok};
use crate::routes::common::JsonBody;
use axum::{Extension, extract::State, response::Response};
use db::models::order::OrderStatus;
use serde::Deserialize;
use services::order_service::{OrderService, PlaceOrder};
use util::state::AppState;

/// POST /order/place
///
/// ```json
/// {
///   "items": [{ "productId": 1, "quantity": 2, "size": null }],
///   "address": { "firstName": "Ravi", "street": "12 MG Road", "city": "Pune", "country": "India", "phone": "+91..." },
///   "paymentMethod": "cod"
/// }
/// ```
///
/// - `201 Created` with the order and its items; the cart is emptied
/// - `400 Bad Request` for non-`cod` payment, empty items, quantity < 1 or incomplete address
/// - `404 Not Found` for an unknown product
pub async fn place_order(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<PlaceOrder>,
) -> Response {
    match OrderService::place(state.db(), claims.sub, req).await {
        Ok(order) => created(order, "Order placed"),
        Err(e) => error_response(e),
    }
}

/// POST /order/userorders
pub async fn user_orders(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match OrderService::list_for_user(state.db(), claims.sub).await {
        Ok(orders) => ok(orders, "Orders retrieved"),
        Err(e) => error_response(e),
    }
}

/// POST /order/list
pub async fn list_orders(State(state): State<AppState>) -> Response {
    match OrderService::list_all(state.db()).await {
        Ok(orders) => ok(orders, "Orders retrieved"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub order_id: i64,
    pub status: OrderStatus,
}

/// POST /order/status
///
/// `{ "orderId": 1, "status": "Shipped" }`
pub async fn update_status(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> Response {
    match OrderService::update_status(state.db(), req.order_id, req.status).await {
        Ok(order) => ok(order, "Status updated"),
        Err(e) => error_response(e),
    }
}
