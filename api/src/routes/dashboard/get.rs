use crate::response::{error_response, ok};
use axum::{extract::State, response::Response};
use services::dashboard_service::DashboardService;
use util::state::AppState;

/// GET /dashboard
///
/// ```json
/// {
///   "orders":    { "total": 40, "today": 3, "yesterday": 2, "growth": 50.0 },
///   "customers": { ... },
///   "enquiries": { ... },
///   "totalRevenue": 12345.5,
///   "topProducts": [{ "name": "Micrometer", "totalQuantity": 21 }],
///   "topEnquiredProducts": [{ "name": "CMM Probe", "count": 7 }]
/// }
/// ```
pub async fn dashboard_stats(State(state): State<AppState>) -> Response {
    match DashboardService::stats(state.db()).await {
        Ok(stats) => ok(stats, "Dashboard data retrieved"),
        Err(e) => error_response(e),
    }
}
