use crate::response::{error_response, ok};
use axum::{
    extract::{Path, State},
    response::Response,
};
use db::models::product;
use services::AppError;
use services::product_service::ProductService;
use util::state::AppState;

/// GET /product/list
///
/// All products, newest first.
pub async fn list_products(State(state): State<AppState>) -> Response {
    match product::Model::list(state.db()).await {
        Ok(products) => ok(products, "Products retrieved"),
        Err(e) => error_response(AppError::from(e)),
    }
}

/// GET /product/slug/{slug}
pub async fn product_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match ProductService::find_by_slug(state.db(), &slug).await {
        Ok(product) => ok(product, "Product retrieved"),
        Err(e) => error_response(e),
    }
}
