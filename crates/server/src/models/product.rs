//! Product and product category domain types.
//!
//! Prices and quantities are stored as numeric-as-text, matching the
//! catalog schema; comparisons cast to numeric in SQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sari_core::{CategoryId, ProductId};

/// A product category (domain type).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: String,
}

/// Data for creating a new product category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductCategory {
    pub name: String,
}

/// A product (domain type).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// The category this product belongs to.
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Sales unit (e.g., "piece", "kg").
    pub unit_type: String,
    /// Acquisition price, numeric-as-text.
    pub cost_price: String,
    /// Selling price, numeric-as-text.
    pub sell_price: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_type: String,
    pub cost_price: String,
    pub sell_price: String,
}

/// Partial update for a product. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub cost_price: Option<String>,
    #[serde(default)]
    pub sell_price: Option<String>,
}

impl Product {
    /// Apply a partial update, returning the merged field values to write.
    #[must_use]
    pub fn merged(&self, patch: &ProductPatch) -> Self {
        Self {
            id: self.id,
            category_id: patch.category_id.unwrap_or(self.category_id),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .or_else(|| self.description.clone()),
            unit_type: patch
                .unit_type
                .clone()
                .unwrap_or_else(|| self.unit_type.clone()),
            cost_price: patch
                .cost_price
                .clone()
                .unwrap_or_else(|| self.cost_price.clone()),
            sell_price: patch
                .sell_price
                .clone()
                .unwrap_or_else(|| self.sell_price.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Declarative product listing filter, deserialized from the query string.
///
/// Unknown query keys are ignored by deserialization; an empty filter
/// matches all rows. Identifier fields match exactly, `name` matches as a
/// case-insensitive substring, and price fields are upper bounds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cost_price: Option<String>,
    #[serde(default)]
    pub sell_price: Option<String>,
}

impl ProductFilter {
    /// Returns `true` when no filter field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.category_id.is_none()
            && self.name.is_none()
            && self.cost_price.is_none()
            && self.sell_price.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter() {
        assert!(ProductFilter::default().is_empty());
        let filter = ProductFilter {
            name: Some("cola".to_owned()),
            ..ProductFilter::default()
        };
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_filter_ignores_unknown_keys() {
        let filter: ProductFilter =
            serde_json::from_str(r#"{"name": "cola", "bogus": "value"}"#).unwrap();
        assert_eq!(filter.name.as_deref(), Some("cola"));
        assert!(filter.sell_price.is_none());
    }

    #[test]
    fn test_merged_product() {
        let product = Product {
            id: ProductId::generate(),
            category_id: CategoryId::generate(),
            name: "Cola 1L".to_owned(),
            description: None,
            unit_type: "bottle".to_owned(),
            cost_price: "30".to_owned(),
            sell_price: "45".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let patch = ProductPatch {
            sell_price: Some("50".to_owned()),
            ..ProductPatch::default()
        };

        let merged = product.merged(&patch);
        assert_eq!(merged.sell_price, "50");
        assert_eq!(merged.cost_price, "30");
        assert_eq!(merged.name, "Cola 1L");
    }
}
