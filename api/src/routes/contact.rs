use crate::response::{error_response, fail, ok};
use crate::routes::common::JsonBody;
use crate::services::email::{ContactMessage, EmailService};
use axum::{Router, http::StatusCode, response::Response, routing::post};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", post(send_contact))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

/// POST /contact
///
/// Nothing is stored; the message is only mailed to the notification inbox,
/// so a failed send is a `500`.
pub async fn send_contact(JsonBody(req): JsonBody<ContactRequest>) -> Response {
    if let Err(e) = req.validate() {
        return error_response(e.into());
    }

    let msg = ContactMessage {
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone,
        subject: req.subject,
        message: req.message,
    };

    match EmailService::send_contact_message(&msg).await {
        Ok(()) => ok((), "Message sent"),
        Err(e) => {
            tracing::error!(error = %e, "Contact message not sent");
            fail(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to send message: {e}"))
        }
    }
}
