use crate::auth::AuthUser;
use crate::response::{created, error_response};
use crate::routes::common::JsonBody;
use crate::services::email::EmailService;
use axum::{extract::State, response::Response};
use services::enquiry_service::{EnquiryService, SubmitEnquiry};
use util::state::AppState;

/// POST /enquiry/submit
///
/// ```json
/// { "productId": 1, "productName": "Vernier Caliper", "email": "buyer@example.com",
///   "quantity": 2, "mobileNo": "+91 98765 43210", "country": "India" }
/// ```
///
/// The enquiry is stored first; the notification email is best effort and a
/// failed send does not fail the request.
///
/// - `201 Created` with the stored enquiry
/// - `400 Bad Request` on invalid email, mobile number or quantity
pub async fn submit_enquiry(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    JsonBody(req): JsonBody<SubmitEnquiry>,
) -> Response {
    let user_id = user.map(|AuthUser(c)| c.sub).filter(|id| *id > 0);

    let enquiry = match EnquiryService::submit(state.db(), req, user_id).await {
        Ok(enquiry) => enquiry,
        Err(e) => return error_response(e),
    };

    if let Err(e) = EmailService::send_enquiry_notification(&enquiry).await {
        tracing::warn!(enquiry_id = enquiry.id, error = %e, "Enquiry notification not sent");
    }

    created(enquiry, "Enquiry submitted")
}
