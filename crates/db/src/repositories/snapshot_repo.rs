//! Repository for the `unit_stats` table, the append-only history log.

use uuid::Uuid;

use catalog_core::types::Timestamp;
use catalog_core::unit::UnitType;

use crate::models::snapshot::UnitSnapshot;
use crate::models::unit::Unit;

/// Column list for unit_stats queries.
const COLUMNS: &str = "stat_id, unit_id, name, unit_type, date, parent_id, price";

/// Appends and queries immutable unit snapshots.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Append one snapshot of the unit's current state under a fresh
    /// snapshot id. Never updates an existing row.
    pub async fn record(
        executor: impl sqlx::PgExecutor<'_>,
        unit: &Unit,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO unit_stats (stat_id, unit_id, name, unit_type, date, parent_id, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(Uuid::new_v4())
        .bind(unit.id)
        .bind(&unit.name)
        .bind(&unit.unit_type)
        .bind(unit.date)
        .bind(unit.parent_id)
        .bind(unit.price)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Full history for one unit, oldest first.
    pub async fn list_for_unit(
        executor: impl sqlx::PgExecutor<'_>,
        unit_id: Uuid,
    ) -> Result<Vec<UnitSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unit_stats WHERE unit_id = $1 ORDER BY date ASC, seq ASC"
        );
        sqlx::query_as::<_, UnitSnapshot>(&query)
            .bind(unit_id)
            .fetch_all(executor)
            .await
    }

    /// Offer snapshots with `date` in `[start, end]`, both ends inclusive.
    pub async fn sales_window(
        executor: impl sqlx::PgExecutor<'_>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<UnitSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unit_stats
             WHERE unit_type = $1 AND date >= $2 AND date <= $3
             ORDER BY date ASC, seq ASC"
        );
        sqlx::query_as::<_, UnitSnapshot>(&query)
            .bind(UnitType::Offer.as_str())
            .bind(start)
            .bind(end)
            .fetch_all(executor)
            .await
    }

    /// Drop every snapshot for a unit. Returns the number of rows purged.
    pub async fn purge_for_unit(
        executor: impl sqlx::PgExecutor<'_>,
        unit_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM unit_stats WHERE unit_id = $1")
            .bind(unit_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
