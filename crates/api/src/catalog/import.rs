//! Batch import: create or update units under one batch timestamp.
//!
//! Items are processed strictly in request order; each item's writes
//! (unit upsert, history snapshot, ancestor price updates) share one
//! transaction. The first failing item aborts the batch with its error;
//! items committed earlier in the same batch stay committed.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use catalog_core::error::CoreError;
use catalog_core::types::Timestamp;
use catalog_core::unit::{validate_offer_price, validate_unit_name, UnitType};
use catalog_db::models::unit::{ImportItem, ImportRequest, Unit};
use catalog_db::repositories::{SnapshotRepo, UnitRepo};
use catalog_db::DbPool;

use crate::catalog::pricing;
use crate::error::AppError;

pub async fn import_batch(pool: &DbPool, request: &ImportRequest) -> Result<(), AppError> {
    for item in &request.items {
        import_item(pool, item, request.update_date).await?;
    }
    Ok(())
}

async fn import_item(pool: &DbPool, item: &ImportItem, date: Timestamp) -> Result<(), AppError> {
    validate_unit_name(&item.name).map_err(CoreError::Validation)?;
    let item_type: UnitType = item.unit_type.parse()?;
    if item_type == UnitType::Offer {
        if let Some(price) = item.price {
            validate_offer_price(price).map_err(CoreError::Validation)?;
        }
    }

    let id = item.id.unwrap_or_else(Uuid::new_v4);

    let mut tx = pool.begin().await?;

    match UnitRepo::find_by_id(&mut *tx, id).await? {
        Some(current) => update_unit(&mut tx, current, item, item_type, date).await?,
        None => create_unit(&mut tx, id, item, item_type, date).await?,
    }

    tx.commit().await?;
    Ok(())
}

/// Overwrite an existing unit. The stored type is immutable; everything
/// else follows the incoming item.
async fn update_unit(
    tx: &mut Transaction<'_, Postgres>,
    current: Unit,
    item: &ImportItem,
    item_type: UnitType,
    date: Timestamp,
) -> Result<(), AppError> {
    if current.unit_type != item_type.as_str() {
        return Err(CoreError::Validation("Forbidden to change type".to_string()).into());
    }

    validate_parent(tx, item.parent_id, Some(current.id)).await?;

    let price = match item_type {
        UnitType::Offer => Some(item.price.unwrap_or(0.0)),
        // A category never takes a price from input; it keeps its
        // derived aggregate (absent while childless).
        UnitType::Category => pricing::category_price(tx, &current).await?,
    };

    let old_parent = current.parent_id;
    let updated = Unit {
        name: item.name.clone(),
        date,
        parent_id: item.parent_id,
        price,
        ..current
    };
    let updated = UnitRepo::update(&mut **tx, &updated).await?;
    SnapshotRepo::record(&mut **tx, &updated).await?;

    let mut origins = vec![updated.parent_id];
    if old_parent != updated.parent_id {
        // Reparented: the subtree the unit left needs its aggregates
        // refreshed as much as the one it joined.
        origins.push(old_parent);
    }
    pricing::propagate(tx, &origins, date).await?;

    Ok(())
}

async fn create_unit(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    item: &ImportItem,
    item_type: UnitType,
    date: Timestamp,
) -> Result<(), AppError> {
    validate_parent(tx, item.parent_id, None).await?;

    let price = match item_type {
        UnitType::Offer => Some(item.price.unwrap_or(0.0)),
        UnitType::Category => None,
    };

    let unit = Unit {
        id,
        name: item.name.clone(),
        unit_type: item_type.as_str().to_string(),
        date,
        parent_id: item.parent_id,
        price,
    };
    let unit = UnitRepo::insert(&mut **tx, &unit).await?;
    SnapshotRepo::record(&mut **tx, &unit).await?;

    pricing::propagate(tx, &[unit.parent_id], date).await?;

    Ok(())
}

/// Check that a referenced parent exists and is a category. On updates,
/// additionally walk up from the new parent: reaching the unit itself
/// would close a cycle.
async fn validate_parent(
    tx: &mut Transaction<'_, Postgres>,
    parent_id: Option<Uuid>,
    unit_id: Option<Uuid>,
) -> Result<(), AppError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    let parent = UnitRepo::find_by_id(&mut **tx, parent_id)
        .await?
        .ok_or_else(|| CoreError::Validation("Parent does not exist".to_string()))?;
    if parent.unit_type != UnitType::Category.as_str() {
        return Err(CoreError::Validation("Parent must be a category".to_string()).into());
    }

    if let Some(unit_id) = unit_id {
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if ancestor.id == unit_id {
                return Err(CoreError::Validation(
                    "Unit cannot be moved under its own subtree".to_string(),
                )
                .into());
            }
            current = match ancestor.parent_id {
                Some(next) => UnitRepo::find_by_id(&mut **tx, next).await?,
                None => None,
            };
        }
    }

    Ok(())
}
