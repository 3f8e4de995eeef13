//! `/user`: storefront accounts, admin login and the chat assistant.

pub mod post;

use axum::{Router, routing::post};
use post::{admin_login, chat, login, register};
use util::state::AppState;

/// - `POST /user/register` → `register`
/// - `POST /user/login` → `login`
/// - `POST /user/admin` → `admin_login`
/// - `POST /user/chat` → `chat`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/admin", post(admin_login))
        .route("/chat", post(chat))
}
