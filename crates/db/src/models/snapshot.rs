//! Historical snapshot model.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use catalog_core::types::Timestamp;

/// A row from the `unit_stats` table: an immutable copy of a unit's
/// observable state at one point in time.
///
/// Serializes with the owning unit's id as `id`; the surrogate
/// `stat_id` never leaves the service.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    #[serde(skip_serializing)]
    pub stat_id: Uuid,
    #[serde(rename = "id")]
    pub unit_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub date: Timestamp,
    pub parent_id: Option<Uuid>,
    pub price: Option<f64>,
}
