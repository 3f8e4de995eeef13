use crate::response::{error_response, ok};
use crate::routes::common::JsonBody;
use axum::{extract::State, response::Response};
use db::models::enquiry::EnquiryStatus;
use serde::Deserialize;
use services::enquiry_service::EnquiryService;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateEnquiryStatus {
    pub id: i64,
    pub status: EnquiryStatus,
}

/// PUT /enquiry/update
///
/// `{ "id": 4, "status": "contacted" }`. Unknown statuses are `400`.
pub async fn update_enquiry_status(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateEnquiryStatus>,
) -> Response {
    match EnquiryService::update_status(state.db(), req.id, req.status).await {
        Ok(enquiry) => ok(enquiry, "Enquiry status updated"),
        Err(e) => error_response(e),
    }
}
