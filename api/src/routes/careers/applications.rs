use crate::auth::guards::allow_admin;
use crate::response::{created, error_response, ok};
use crate::routes::common::{JsonBody, MultipartForm, discard_files, store_files};
use axum::{
    Router,
    extract::{Multipart, Path, State},
    middleware::from_fn,
    response::Response,
    routing::{get, post, put},
};
use db::models::application::{self, ApplicationStatus};
use serde::Deserialize;
use services::AppError;
use services::application_service::{ApplicationService, SubmitApplication};
use services::uploads::RESUME;
use util::state::AppState;
use validator::Validate;

const RESUME_FOLDER: &str = "resumes";

/// - `POST /applications/submit` (public, multipart)
/// - `GET /applications`, `GET|DELETE /applications/{id}`,
///   `PUT /applications/{id}/status` (admin)
pub fn application_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_applications))
        .route("/{id}", get(get_application).delete(delete_application))
        .route("/{id}/status", put(update_application_status))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/submit", post(submit_application))
        .merge(admin)
}

/// POST /careers/applications/submit
///
/// Multipart: `name, email, qualification, position, mobile, message?` and a
/// `resume` file (pdf, doc or docx, at most 2MB). The resume is checked before
/// anything is stored.
///
/// - `201 Created` with the application
/// - `400 Bad Request` for invalid fields or a rejected resume
pub async fn submit_application(State(state): State<AppState>, multipart: Multipart) -> Response {
    match submit_from_form(&state, multipart).await {
        Ok(app) => created(app, "Application submitted"),
        Err(e) => error_response(e),
    }
}

async fn submit_from_form(
    state: &AppState,
    multipart: Multipart,
) -> Result<application::Model, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let req = SubmitApplication {
        name: form.string("name"),
        email: form.string("email").trim().to_string(),
        qualification: form.string("qualification"),
        position: form.string("position"),
        mobile: form.string("mobile").trim().to_string(),
        message: form.string("message"),
    };
    req.validate()?;

    let resume = form
        .take_files(|name| name == "resume")
        .into_iter()
        .next()
        .ok_or_else(|| AppError::validation("Resume is required"))?;

    let urls = store_files(state.storage(), RESUME_FOLDER, &RESUME, std::slice::from_ref(&resume)).await?;
    let resume_url = urls
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Storage("Resume was not stored".into()))?;

    match ApplicationService::submit(state.db(), req, resume_url.clone()).await {
        Ok(app) => Ok(app),
        Err(e) => {
            discard_files(state.storage(), std::slice::from_ref(&resume_url)).await;
            Err(e)
        }
    }
}

async fn list_applications(State(state): State<AppState>) -> Response {
    match ApplicationService::list(state.db()).await {
        Ok(apps) => ok(apps, "Applications retrieved"),
        Err(e) => error_response(e),
    }
}

async fn get_application(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match ApplicationService::get(state.db(), id).await {
        Ok(app) => ok(app, "Application retrieved"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: ApplicationStatus,
}

/// `{ "status": "shortlisted" }`
async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> Response {
    match ApplicationService::update_status(state.db(), id, req.status).await {
        Ok(app) => ok(app, "Application status updated"),
        Err(e) => error_response(e),
    }
}

async fn delete_application(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match ApplicationService::delete(state.db(), id).await {
        Ok(app) => {
            state.storage().remove(&app.resume_url).await;
            ok((), "Application deleted")
        }
        Err(e) => error_response(e),
    }
}
