//! Repository for the `units` table.
//!
//! Every method takes an executor so the same query runs against the
//! pool or inside a transaction (`&pool`, `&mut *conn`, `&mut **tx`).

use uuid::Uuid;

use catalog_core::types::Timestamp;

use crate::models::unit::Unit;

/// Column list for units queries.
const COLUMNS: &str = "id, name, unit_type, date, parent_id, price";

/// Provides CRUD operations for catalog units.
pub struct UnitRepo;

impl UnitRepo {
    /// Find a unit by its ID.
    pub async fn find_by_id(
        executor: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units WHERE id = $1");
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List every unit in the catalog, oldest update first.
    pub async fn list_all(executor: impl sqlx::PgExecutor<'_>) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units ORDER BY date ASC, id ASC");
        sqlx::query_as::<_, Unit>(&query).fetch_all(executor).await
    }

    /// List the direct children of a unit.
    pub async fn children_of(
        executor: impl sqlx::PgExecutor<'_>,
        parent_id: Uuid,
    ) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units WHERE parent_id = $1 ORDER BY date ASC, id ASC");
        sqlx::query_as::<_, Unit>(&query)
            .bind(parent_id)
            .fetch_all(executor)
            .await
    }

    /// Insert a new unit, returning the created row.
    pub async fn insert(
        executor: impl sqlx::PgExecutor<'_>,
        unit: &Unit,
    ) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "INSERT INTO units (id, name, unit_type, date, parent_id, price)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(unit.id)
            .bind(&unit.name)
            .bind(&unit.unit_type)
            .bind(unit.date)
            .bind(unit.parent_id)
            .bind(unit.price)
            .fetch_one(executor)
            .await
    }

    /// Overwrite a unit's mutable fields, returning the updated row.
    ///
    /// `unit_type` is immutable and deliberately not part of the SET list.
    pub async fn update(
        executor: impl sqlx::PgExecutor<'_>,
        unit: &Unit,
    ) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "UPDATE units SET name = $2, date = $3, parent_id = $4, price = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(unit.id)
            .bind(&unit.name)
            .bind(unit.date)
            .bind(unit.parent_id)
            .bind(unit.price)
            .fetch_one(executor)
            .await
    }

    /// Persist a recomputed aggregate price together with the batch date,
    /// returning the updated row.
    pub async fn set_price_and_date(
        executor: impl sqlx::PgExecutor<'_>,
        id: Uuid,
        price: Option<f64>,
        date: Timestamp,
    ) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "UPDATE units SET price = $2, date = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .bind(price)
            .bind(date)
            .fetch_one(executor)
            .await
    }

    /// Delete a unit by ID. Returns `true` if a row was deleted.
    pub async fn delete(
        executor: impl sqlx::PgExecutor<'_>,
        id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
