//! `/enquiry`: product enquiries (sales leads).

pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use get::{list_enquiries, my_enquiries};
use post::submit_enquiry;
use put::update_enquiry_status;
use util::state::AppState;

/// - `POST /enquiry/submit` (public; a user token links the enquiry to the user)
/// - `GET /enquiry/mine` (user token)
/// - `GET /enquiry/get`, `PUT /enquiry/update` (admin)
pub fn enquiry_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/get", get(list_enquiries))
        .route("/update", put(update_enquiry_status))
        .route_layer(from_fn(allow_admin));

    let user = Router::new()
        .route("/mine", get(my_enquiries))
        .route_layer(from_fn(allow_authenticated));

    Router::new()
        .route("/submit", post(submit_enquiry))
        .merge(admin)
        .merge(user)
}
