//! Handlers for unit price history and the trailing sales window.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Duration, Utc};

use catalog_core::error::CoreError;
use catalog_core::unit::{parse_unit_id, SALES_WINDOW_HOURS};
use catalog_db::models::snapshot::UnitSnapshot;
use catalog_db::repositories::SnapshotRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Snapshot collection envelope returned by both statistics endpoints.
#[derive(Debug, serde::Serialize)]
pub struct StatisticsResponse {
    pub items: Vec<UnitSnapshot>,
}

/// Query parameters for `GET /sales`.
#[derive(Debug, serde::Deserialize)]
pub struct SalesParams {
    pub date: Option<String>,
}

/// GET /node/{id}/statistic
///
/// Full snapshot history for one unit, oldest first. A unit that was
/// ever imported has at least one snapshot, so an empty history means
/// the id is unknown (or already deleted).
pub async fn unit_statistic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_unit_id(&id).map_err(AppError::BadRequest)?;

    let items = SnapshotRepo::list_for_unit(&state.pool, id).await?;
    if items.is_empty() {
        return Err(CoreError::NotFound { entity: "Unit", id }.into());
    }

    Ok(Json(StatisticsResponse { items }))
}

/// GET /sales?date=<ISO8601>
///
/// Offer snapshots in the 24h window ending at `date`, both endpoints
/// inclusive. An empty window is a success, not an error.
pub async fn sales(
    State(state): State<AppState>,
    Query(params): Query<SalesParams>,
) -> AppResult<impl IntoResponse> {
    let raw = params.date.as_deref().unwrap_or_default();
    let end = DateTime::parse_from_rfc3339(raw)
        .map_err(|_| AppError::BadRequest("Incorrect date format".to_string()))?
        .with_timezone(&Utc);
    let start = end - Duration::hours(SALES_WINDOW_HOURS);

    let items = SnapshotRepo::sales_window(&state.pool, start, end).await?;

    Ok(Json(StatisticsResponse { items }))
}
