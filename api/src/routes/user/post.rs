use crate::auth::{ADMIN_SUBJECT, generate_jwt};
use crate::response::{created, error_response, fail, ok};
use crate::routes::common::JsonBody;
use crate::services::chat::ChatService;
use axum::{extract::State, http::StatusCode, response::Response};
use serde::{Deserialize, Serialize};
use services::user_service::{Credentials, RegisterUser, UserService};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

fn token_response(
    id: i64,
    name: String,
    email: String,
    admin: bool,
    status: StatusCode,
    message: &str,
) -> Response {
    match generate_jwt(id, admin) {
        Ok((token, expires_at)) => {
            let data = AuthResponse { id, name, email, admin, token, expires_at };
            if status == StatusCode::CREATED {
                created(data, message)
            } else {
                ok(data, message)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Token encoding failed");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Could not issue token")
        }
    }
}

/// POST /user/register
///
/// ```json
/// { "name": "Jane", "email": "jane@example.com", "password": "correct-horse" }
/// ```
///
/// - `201 Created` with `{ id, name, email, admin, token, expiresAt }`
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` if the email is taken
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterUser>,
) -> Response {
    match UserService::register(state.db(), req).await {
        Ok(user) => token_response(
            user.id,
            user.name,
            user.email,
            false,
            StatusCode::CREATED,
            "User registered successfully",
        ),
        Err(e) => error_response(e),
    }
}

/// POST /user/login
///
/// - `200 OK` with a user token
/// - `401 Unauthorized` for unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    JsonBody(creds): JsonBody<Credentials>,
) -> Response {
    match UserService::verify_credentials(state.db(), &creds).await {
        Ok(user) => token_response(user.id, user.name, user.email, false, StatusCode::OK, "Login successful"),
        Err(e) => error_response(e),
    }
}

/// POST /user/admin
///
/// Checks the body against `ADMIN_EMAIL` / `ADMIN_PASSWORD` and returns an admin token.
pub async fn admin_login(JsonBody(creds): JsonBody<Credentials>) -> Response {
    match UserService::verify_admin(&creds) {
        Ok(()) => token_response(
            ADMIN_SUBJECT,
            "Admin".into(),
            creds.email.trim().to_lowercase(),
            true,
            StatusCode::OK,
            "Admin login successful",
        ),
        Err(e) => {
            tracing::warn!(email = %creds.email, "Rejected admin login");
            error_response(e)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1 to 2000 characters"))]
    pub message: String,
}

/// POST /user/chat
///
/// ```json
/// { "success": true, "data": { "reply": "...", "source": "faq" }, "message": "Reply generated" }
/// ```
pub async fn chat(JsonBody(req): JsonBody<ChatRequest>) -> Response {
    if let Err(e) = req.validate() {
        return error_response(e.into());
    }
    if req.message.trim().is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Message must not be blank");
    }
    ok(ChatService::reply(req.message.trim()).await, "Reply generated")
}
