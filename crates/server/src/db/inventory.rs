//! Inventory repository for database operations.

use sqlx::PgPool;

use sari_core::InventoryId;

use super::{RepositoryError, map_unique_violation};
use crate::models::{Inventory, InventoryPatch, NewInventory};

const INVENTORY_COLUMNS: &str = "id, product_id, quantity, reorder_level, created_at, updated_at";

/// Repository for inventory database operations.
pub struct InventoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all inventory records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Inventory>, RepositoryError> {
        let inventories = sqlx::query_as::<_, Inventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventories ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(inventories)
    }

    /// Get an inventory record by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: InventoryId) -> Result<Option<Inventory>, RepositoryError> {
        let inventory = sqlx::query_as::<_, Inventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(inventory)
    }

    /// Create a new inventory record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product already has one.
    /// Returns `RepositoryError::Database` for other database errors,
    /// including a foreign key failure when the product doesn't exist.
    pub async fn create(&self, new: &NewInventory) -> Result<Inventory, RepositoryError> {
        let inventory = sqlx::query_as::<_, Inventory>(&format!(
            "INSERT INTO inventories (product_id, quantity, reorder_level) \
             VALUES ($1, $2, $3) \
             RETURNING {INVENTORY_COLUMNS}"
        ))
        .bind(new.product_id)
        .bind(&new.quantity)
        .bind(&new.reorder_level)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product already has an inventory record"))?;

        Ok(inventory)
    }

    /// Apply a partial update to an inventory record.
    ///
    /// The read and the write run in one transaction with the row locked,
    /// so concurrent patches can't overwrite each other's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Conflict` if the target product already has one.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: InventoryId,
        patch: &InventoryPatch,
    ) -> Result<Inventory, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Inventory>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventories WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;
        let merged = current.merged(patch);

        let inventory = sqlx::query_as::<_, Inventory>(&format!(
            "UPDATE inventories \
             SET product_id = $1, quantity = $2, reorder_level = $3, updated_at = now() \
             WHERE id = $4 \
             RETURNING {INVENTORY_COLUMNS}"
        ))
        .bind(merged.product_id)
        .bind(&merged.quantity)
        .bind(&merged.reorder_level)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "product already has an inventory record"))?;

        tx.commit().await?;

        Ok(inventory)
    }

    /// Delete an inventory record by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: InventoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM inventories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
