use crate::auth::AuthUser;
use crate::response::{error_response, ok};
use axum::{Extension, extract::State, response::Response};
use services::enquiry_service::EnquiryService;
use util::state::AppState;

/// GET /enquiry/get
pub async fn list_enquiries(State(state): State<AppState>) -> Response {
    match EnquiryService::list(state.db()).await {
        Ok(list) => ok(list, "Enquiries retrieved"),
        Err(e) => error_response(e),
    }
}

/// GET /enquiry/mine
pub async fn my_enquiries(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match EnquiryService::list_for_user(state.db(), claims.sub).await {
        Ok(list) => ok(list, "Enquiries retrieved"),
        Err(e) => error_response(e),
    }
}
