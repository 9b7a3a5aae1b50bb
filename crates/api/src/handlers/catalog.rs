//! Handlers for the catalog tree: listing, node queries, batch import,
//! and recursive deletion.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use catalog_core::error::CoreError;
use catalog_core::types::Timestamp;
use catalog_core::unit::{parse_unit_id, UnitType};
use catalog_db::models::unit::ImportRequest;
use catalog_db::repositories::UnitRepo;

use crate::catalog::{deletion, import, tree};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Flat unit representation with derived child ids, used by `GET /all`.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitListItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub date: Timestamp,
    pub parent_id: Option<Uuid>,
    pub price: Option<f64>,
    pub children: Option<Vec<Uuid>>,
}

/// GET /all
///
/// Every unit currently in the catalog, with derived child-id lists.
pub async fn list_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let units = UnitRepo::list_all(&state.pool).await?;

    let mut child_ids: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for unit in &units {
        if let Some(parent_id) = unit.parent_id {
            child_ids.entry(parent_id).or_default().push(unit.id);
        }
    }

    let items: Vec<UnitListItem> = units
        .into_iter()
        .map(|unit| {
            let children = (unit.unit_type == UnitType::Category.as_str())
                .then(|| child_ids.remove(&unit.id).unwrap_or_default());
            UnitListItem {
                id: unit.id,
                name: unit.name,
                unit_type: unit.unit_type,
                date: unit.date,
                parent_id: unit.parent_id,
                price: unit.price,
                children,
            }
        })
        .collect();

    Ok(Json(items))
}

/// GET /nodes/{id}
///
/// One unit with its nested children tree.
pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_unit_id(&id).map_err(AppError::BadRequest)?;

    let unit = UnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Unit", id })?;

    let mut conn = state.pool.acquire().await?;
    let subtree = tree::load_subtree(&mut *conn, &unit).await?;
    let node = tree::build_tree(&subtree, id)
        .ok_or_else(|| CoreError::Internal(format!("subtree of {id} lost its root")))?;

    Ok(Json(node))
}

/// POST /imports
///
/// Create or update a batch of units under one timestamp. The body is
/// decoded by hand so a malformed request yields a 400, like every
/// other import validation failure.
pub async fn import(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let request: ImportRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid import request: {e}")))?;

    let items = request.items.len();
    import::import_batch(&state.pool, &request).await?;

    tracing::info!(items, update_date = %request.update_date, "Import batch applied");

    Ok(StatusCode::CREATED)
}

/// DELETE /delete/{id}
///
/// Remove a unit, its whole subtree, and all their history.
pub async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_unit_id(&id).map_err(AppError::BadRequest)?;

    let unit = UnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Unit", id })?;

    let removed = deletion::delete_subtree(&state.pool, &unit).await?;

    tracing::info!(unit_id = %id, removed, "Unit deleted recursively");

    Ok(Json(MessageResponse {
        message: "deleted successfully".to_string(),
    }))
}
