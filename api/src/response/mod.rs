//! JSON envelope shared by every endpoint, and the mapping from service
//! errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::AppError;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// { "success": true, "data": { ... }, "message": "Product added" }
/// ```
///
/// Errors use `ApiResponse<()>`, so `data` is `null`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// `200 OK` with the envelope around `data`.
pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data, message))).into_response()
}

/// `201 Created` with the envelope around `data`.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::success(data, message))).into_response()
}

/// Error envelope with an explicit status.
pub fn fail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::Storage(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a service error to its status and envelope. Server-side failures are
/// logged at `error`.
pub fn error_response(err: AppError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    }
    fail(status, err.to_string())
}
