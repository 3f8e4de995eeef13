use crate::auth::guards::allow_admin;
use crate::response::{created, error_response, ok};
use crate::routes::common::JsonBody;
use axum::{
    Router,
    extract::{Path, State},
    middleware::from_fn,
    response::Response,
    routing::{get, post, put},
};
use services::career_service::{CareerInput, CareerService};
use util::state::AppState;

/// - `GET /careers`, `GET /careers/{id}` (public)
/// - `POST /careers`, `PUT /careers/{id}`, `DELETE /careers/{id}` (admin)
pub fn careers_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_career))
        .route("/{id}", put(update_career).delete(delete_career))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/", get(list_careers))
        .route("/{id}", get(get_career))
        .merge(admin)
}

async fn list_careers(State(state): State<AppState>) -> Response {
    match CareerService::list(state.db()).await {
        Ok(careers) => ok(careers, "Careers retrieved"),
        Err(e) => error_response(e),
    }
}

async fn get_career(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match CareerService::get(state.db(), id).await {
        Ok(career) => ok(career, "Career retrieved"),
        Err(e) => error_response(e),
    }
}

/// `responsibilities` and `requirements` must be non-empty arrays of non-blank strings.
async fn create_career(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CareerInput>,
) -> Response {
    match CareerService::create(state.db(), req).await {
        Ok(career) => created(career, "Career created"),
        Err(e) => error_response(e),
    }
}

async fn update_career(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<CareerInput>,
) -> Response {
    match CareerService::update(state.db(), id, req).await {
        Ok(career) => ok(career, "Career updated"),
        Err(e) => error_response(e),
    }
}

async fn delete_career(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match CareerService::delete(state.db(), id).await {
        Ok(()) => ok((), "Career deleted"),
        Err(e) => error_response(e),
    }
}
