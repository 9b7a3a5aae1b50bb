//! Route table for statistics queries.
//!
//! Mounted at the server root by `build_app_router`.

use axum::routing::get;
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Statistics routes.
///
/// ```text
/// GET /node/{id}/statistic  -> unit_statistic
/// GET /sales                -> sales (?date=<ISO8601>)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/node/{id}/statistic", get(statistics::unit_statistic))
        .route("/sales", get(statistics::sales))
}
