//! Store-backed tree walks and nested node assembly.

use serde::Serialize;
use sqlx::PgConnection;
use uuid::Uuid;

use catalog_core::types::Timestamp;
use catalog_core::unit::UnitType;
use catalog_db::models::unit::Unit;
use catalog_db::repositories::UnitRepo;

/// One node of the nested tree returned by `GET /nodes/{id}`.
///
/// Offers serialize `children` as null; categories as an array.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitNode {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub date: Timestamp,
    pub parent_id: Option<Uuid>,
    pub price: Option<f64>,
    pub children: Option<Vec<UnitNode>>,
}

/// Load `root` and every descendant with an explicit breadth-first walk.
///
/// One children query per category; depth is bounded by the tree height,
/// which the import-time acyclicity guard keeps finite.
pub async fn load_subtree(conn: &mut PgConnection, root: &Unit) -> Result<Vec<Unit>, sqlx::Error> {
    let mut units = vec![root.clone()];
    let mut next = 0;
    while next < units.len() {
        if units[next].unit_type == UnitType::Category.as_str() {
            let children = UnitRepo::children_of(&mut *conn, units[next].id).await?;
            units.extend(children);
        }
        next += 1;
    }
    Ok(units)
}

/// Assemble the nested tree for `root` from a flat subtree listing.
pub fn build_tree(units: &[Unit], root: Uuid) -> Option<UnitNode> {
    let unit = units.iter().find(|u| u.id == root)?;
    let children = (unit.unit_type == UnitType::Category.as_str()).then(|| {
        units
            .iter()
            .filter(|u| u.parent_id == Some(root))
            .filter_map(|u| build_tree(units, u.id))
            .collect()
    });
    Some(UnitNode {
        id: unit.id,
        name: unit.name.clone(),
        unit_type: unit.unit_type.clone(),
        date: unit.date,
        parent_id: unit.parent_id,
        price: unit.price,
        children,
    })
}
