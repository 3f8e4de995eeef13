use crate::auth::guards::allow_admin;
use crate::response::{created, error_response, ok};
use crate::routes::common::{MultipartForm, discard_files, store_files};
use axum::{
    Router,
    extract::{Multipart, Path, State},
    middleware::from_fn,
    response::Response,
    routing::{get, post, put},
};
use db::models::news;
use services::AppError;
use services::news_service::{NewsInput, NewsService};
use services::uploads::IMAGE;
use util::state::AppState;
use validator::Validate;

const IMAGE_FOLDER: &str = "news";

pub fn news_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_news))
        .route("/{id}", put(update_news).delete(delete_news))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/", get(list_news))
        .route("/{id}", get(get_news))
        .merge(admin)
}

/// Text fields plus every `images` part, already stored.
async fn read_form(
    state: &AppState,
    multipart: Multipart,
) -> Result<(NewsInput, Vec<String>), AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = NewsInput {
        title: form.string("title"),
        description: form.string("description"),
        date: form.string("date"),
        time: form.string("time"),
        location: form.string("location"),
        category: form.string("category"),
    };
    // Reject bad fields before anything is written to storage.
    input.validate()?;
    let files = form.take_files(|name| name == "images" || name == "image");
    let urls = store_files(state.storage(), IMAGE_FOLDER, &IMAGE, &files).await?;
    Ok((input, urls))
}

async fn list_news(State(state): State<AppState>) -> Response {
    match NewsService::list(state.db()).await {
        Ok(list) => ok(list, "News retrieved"),
        Err(e) => error_response(e),
    }
}

async fn get_news(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match NewsService::get(state.db(), id).await {
        Ok(item) => ok(item, "News retrieved"),
        Err(e) => error_response(e),
    }
}

async fn create_news(State(state): State<AppState>, multipart: Multipart) -> Response {
    match create_from_form(&state, multipart).await {
        Ok(item) => created(item, "News created"),
        Err(e) => error_response(e),
    }
}

async fn create_from_form(state: &AppState, multipart: Multipart) -> Result<news::Model, AppError> {
    let (input, urls) = read_form(state, multipart).await?;
    match NewsService::create(state.db(), input, urls.clone()).await {
        Ok(item) => Ok(item),
        Err(e) => {
            discard_files(state.storage(), &urls).await;
            Err(e)
        }
    }
}

async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    match update_from_form(&state, id, multipart).await {
        Ok(item) => ok(item, "News updated"),
        Err(e) => error_response(e),
    }
}

async fn update_from_form(state: &AppState, id: i64, multipart: Multipart) -> Result<news::Model, AppError> {
    let (input, urls) = read_form(state, multipart).await?;
    let new_images = (!urls.is_empty()).then(|| urls.clone());
    match NewsService::update(state.db(), id, input, new_images).await {
        Ok((item, replaced)) => {
            discard_files(state.storage(), &replaced).await;
            Ok(item)
        }
        Err(e) => {
            discard_files(state.storage(), &urls).await;
            Err(e)
        }
    }
}

async fn delete_news(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match NewsService::delete(state.db(), id).await {
        Ok(item) => {
            discard_files(state.storage(), &item.images.0).await;
            ok((), "News deleted")
        }
        Err(e) => error_response(e),
    }
}
