//! Inventory domain types.
//!
//! One inventory row tracks the stock level of a single product. Quantities
//! and reorder thresholds are numeric-as-text like the product prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sari_core::{InventoryId, ProductId};

/// An inventory record (domain type).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: InventoryId,
    /// The product this stock level belongs to.
    pub product_id: ProductId,
    /// Quantity on hand, numeric-as-text.
    pub quantity: String,
    /// Restock threshold, numeric-as-text.
    pub reorder_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new inventory record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventory {
    pub product_id: ProductId,
    pub quantity: String,
    pub reorder_level: String,
}

/// Partial update for an inventory record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<String>,
}

impl Inventory {
    /// Apply a partial update, returning the merged field values to write.
    #[must_use]
    pub fn merged(&self, patch: &InventoryPatch) -> Self {
        Self {
            id: self.id,
            product_id: patch.product_id.unwrap_or(self.product_id),
            quantity: patch
                .quantity
                .clone()
                .unwrap_or_else(|| self.quantity.clone()),
            reorder_level: patch
                .reorder_level
                .clone()
                .unwrap_or_else(|| self.reorder_level.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
