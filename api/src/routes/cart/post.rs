use crate::auth::AuthUser;
use crate::response::{error_response, ok};
use crate::routes::common::JsonBody;
use axum::{Extension, extract::State, response::Response};
use serde::Deserialize;
use services::user_service::UserService;
use util::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub item_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCart {
    pub item_id: i64,
    pub quantity: i64,
}

/// POST /cart/get
///
/// `data` is an object of product id → quantity, e.g. `{ "3": 2 }`.
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match UserService::cart(state.db(), claims.sub).await {
        Ok(cart) => ok(cart, "Cart retrieved"),
        Err(e) => error_response(e),
    }
}

/// POST /cart/add
///
/// `{ "itemId": 3 }` adds one unit.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<AddToCart>,
) -> Response {
    match UserService::add_to_cart(state.db(), claims.sub, req.item_id).await {
        Ok(cart) => ok(cart, "Added to cart"),
        Err(e) => error_response(e),
    }
}

/// POST /cart/update
///
/// `{ "itemId": 3, "quantity": 0 }`; zero removes the item.
pub async fn update_cart(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<UpdateCart>,
) -> Response {
    match UserService::update_cart(state.db(), claims.sub, req.item_id, req.quantity).await {
        Ok(cart) => ok(cart, "Cart updated"),
        Err(e) => error_response(e),
    }
}
