//! Ancestor price propagation.
//!
//! After a unit is written, every category on the path from its parent
//! to the root gets a freshly computed aggregate, a bumped `date`, and a
//! history snapshot. The aggregate is always recomputed from the current
//! subtree rows, so stored intermediate category prices are never inputs
//! and walk order between converging chains does not matter.

use std::collections::HashSet;

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use catalog_core::error::CoreError;
use catalog_core::pricing::{aggregate_for_category, PriceNode};
use catalog_core::types::Timestamp;
use catalog_core::unit::UnitType;
use catalog_db::models::unit::Unit;
use catalog_db::repositories::{SnapshotRepo, UnitRepo};

use crate::catalog::tree;
use crate::error::AppError;

/// Recompute and persist aggregates for every ancestor reachable from
/// `origins`, walking each chain to the root. `None` origins are roots
/// themselves and contribute nothing. Already-visited ancestors are
/// skipped: once a chain joins a previously walked one, the rest of the
/// path is up to date.
pub async fn propagate(
    tx: &mut Transaction<'_, Postgres>,
    origins: &[Option<Uuid>],
    date: Timestamp,
) -> Result<(), AppError> {
    let mut visited: HashSet<Uuid> = HashSet::new();
    for origin in origins {
        let mut current = *origin;
        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            let Some(unit) = UnitRepo::find_by_id(&mut **tx, id).await? else {
                return Err(CoreError::Internal(format!(
                    "ancestor {id} disappeared during price propagation"
                ))
                .into());
            };
            let price = category_price(tx, &unit).await?;
            let updated = UnitRepo::set_price_and_date(&mut **tx, id, price, date).await?;
            SnapshotRepo::record(&mut **tx, &updated).await?;
            current = unit.parent_id;
        }
    }
    Ok(())
}

/// Aggregate price of a category from its current subtree: `None` while
/// it has no direct children, otherwise the recursive mean.
pub async fn category_price(
    tx: &mut Transaction<'_, Postgres>,
    unit: &Unit,
) -> Result<Option<f64>, AppError> {
    let subtree = tree::load_subtree(&mut **tx, unit).await?;
    let nodes = price_nodes(&subtree)?;
    Ok(aggregate_for_category(&nodes, unit.id))
}

fn price_nodes(units: &[Unit]) -> Result<Vec<PriceNode>, CoreError> {
    units
        .iter()
        .map(|u| {
            let unit_type = u.unit_type.parse::<UnitType>().map_err(|_| {
                CoreError::Internal(format!("unit {} has corrupt type {:?}", u.id, u.unit_type))
            })?;
            Ok(PriceNode {
                id: u.id,
                parent_id: u.parent_id,
                unit_type,
                price: u.price,
            })
        })
        .collect()
}
