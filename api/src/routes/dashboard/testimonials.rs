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
use db::models::testimonial;
use services::AppError;
use services::testimonial_service::{TestimonialInput, TestimonialService};
use services::uploads::IMAGE;
use util::state::AppState;
use validator::Validate;

const IMAGE_FOLDER: &str = "testimonials";

pub fn testimonial_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_testimonial))
        .route("/{id}", put(update_testimonial).delete(delete_testimonial))
        .route_layer(from_fn(allow_admin));

    Router::new().route("/", get(list_testimonials)).merge(admin)
}

/// Reads the form and stores the optional `image` part.
async fn read_form(
    state: &AppState,
    multipart: Multipart,
) -> Result<(TestimonialInput, Option<String>), AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = TestimonialInput {
        name: form.string("name"),
        position: form.string("position"),
        content: form.string("content"),
        video_url: form.optional("videoUrl"),
        stars: form.parse("stars")?,
    };
    // Reject bad fields before anything is written to storage.
    input.validate()?;
    let images = form.take_files(|name| name == "image");
    let image = match images.first() {
        Some(file) => store_files(state.storage(), IMAGE_FOLDER, &IMAGE, std::slice::from_ref(file))
            .await?
            .into_iter()
            .next(),
        None => None,
    };
    Ok((input, image))
}

async fn list_testimonials(State(state): State<AppState>) -> Response {
    match TestimonialService::list(state.db()).await {
        Ok(list) => ok(list, "Testimonials retrieved"),
        Err(e) => error_response(e),
    }
}

/// Multipart: `name, position, content, stars, videoUrl?` and an optional `image`.
async fn create_testimonial(State(state): State<AppState>, multipart: Multipart) -> Response {
    match create_from_form(&state, multipart).await {
        Ok(t) => created(t, "Testimonial created"),
        Err(e) => error_response(e),
    }
}

async fn create_from_form(state: &AppState, multipart: Multipart) -> Result<testimonial::Model, AppError> {
    let (input, image) = read_form(state, multipart).await?;
    match TestimonialService::create(state.db(), input, image.clone()).await {
        Ok(t) => Ok(t),
        Err(e) => {
            discard_files(state.storage(), image.as_slice()).await;
            Err(e)
        }
    }
}

async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    match update_from_form(&state, id, multipart).await {
        Ok(t) => ok(t, "Testimonial updated"),
        Err(e) => error_response(e),
    }
}

async fn update_from_form(
    state: &AppState,
    id: i64,
    multipart: Multipart,
) -> Result<testimonial::Model, AppError> {
    let (input, image) = read_form(state, multipart).await?;
    match TestimonialService::update(state.db(), id, input, image.clone()).await {
        Ok((t, replaced)) => {
            discard_files(state.storage(), replaced.as_slice()).await;
            Ok(t)
        }
        Err(e) => {
            discard_files(state.storage(), image.as_slice()).await;
            Err(e)
        }
    }
}

async fn delete_testimonial(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match TestimonialService::delete(state.db(), id).await {
        Ok(t) => {
            discard_files(state.storage(), t.image.as_slice()).await;
            ok((), "Testimonial deleted")
        }
        Err(e) => error_response(e),
    }
}
