//! Recursive subtree removal with history purge.

use catalog_db::models::unit::Unit;
use catalog_db::repositories::{SnapshotRepo, UnitRepo};
use catalog_db::DbPool;

use crate::catalog::tree;
use crate::error::AppError;

/// Remove `root` and every descendant, purging each removed unit's
/// snapshots. The whole subtree goes in one transaction.
///
/// The flat breadth-first listing is deleted in reverse, so children
/// always go before their parent (the `parent_id` foreign key requires
/// it, and it matches the bottom-up protocol). Returns the number of
/// units removed.
pub async fn delete_subtree(pool: &DbPool, root: &Unit) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;

    let units = tree::load_subtree(&mut *tx, root).await?;
    for unit in units.iter().rev() {
        SnapshotRepo::purge_for_unit(&mut *tx, unit.id).await?;
        UnitRepo::delete(&mut *tx, unit.id).await?;
    }

    tx.commit().await?;
    Ok(units.len() as u64)
}
