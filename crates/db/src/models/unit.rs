//! Shop unit model and import DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use catalog_core::types::Timestamp;

/// A row from the `units` table: the current state of one catalog node.
///
/// `children` is not stored; it is derived by querying for rows whose
/// `parent_id` points here.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub date: Timestamp,
    pub parent_id: Option<Uuid>,
    pub price: Option<f64>,
}

/// One element of an import batch.
///
/// `id` is assigned by the server when absent. `type` stays a raw string
/// so an unknown value fails item-by-item during batch processing
/// instead of rejecting the whole request at deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub parent_id: Option<Uuid>,
    pub price: Option<f64>,
}

/// Import request body: an ordered batch sharing one timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub items: Vec<ImportItem>,
    pub update_date: Timestamp,
}
