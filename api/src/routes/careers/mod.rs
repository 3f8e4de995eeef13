//! `/careers`: job applications. Postings themselves live under `/dashboard/careers`.

pub mod applications;

use axum::Router;
use util::state::AppState;

pub fn careers_routes() -> Router<AppState> {
    Router::new().nest("/applications", applications::application_routes())
}
