//! Product and category repositories for database operations.
//!
//! Product listing supports declarative filtering; the filter is compiled
//! into a single SQL statement with `QueryBuilder`. Price columns are
//! numeric-as-text, so comparisons cast both sides to `numeric`.

use sqlx::{PgPool, Postgres, QueryBuilder};

use sari_core::{CategoryId, ProductId};

use super::{RepositoryError, map_unique_violation};
use crate::models::{
    NewProduct, NewProductCategory, Product, ProductCategory, ProductFilter, ProductPatch,
};

const PRODUCT_COLUMNS: &str = "id, category_id, name, description, unit_type, \
     cost_price, sell_price, created_at, updated_at";

/// Build the filtered product listing query.
///
/// Identifier fields match exactly, `name` matches as a case-insensitive
/// substring, and price fields are upper bounds.
fn filtered_query(filter: &ProductFilter) -> QueryBuilder<'_, Postgres> {
    let mut query: QueryBuilder<'_, Postgres> =
        QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1=1"));

    if let Some(id) = filter.id {
        query.push(" AND id = ").push_bind(id);
    }
    if let Some(category_id) = filter.category_id {
        query.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(ref name) = filter.name {
        query.push(" AND name ILIKE ").push_bind(format!("%{name}%"));
    }
    if let Some(ref cost_price) = filter.cost_price {
        query
            .push(" AND cost_price::numeric <= ")
            .push_bind(cost_price.clone())
            .push("::numeric");
    }
    if let Some(ref sell_price) = filter.sell_price {
        query
            .push(" AND sell_price::numeric <= ")
            .push_bind(sell_price.clone())
            .push("::numeric");
    }

    query.push(" ORDER BY created_at DESC");
    query
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching a filter, newest first.
    ///
    /// An empty filter matches all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let products = filtered_query(filter)
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including
    /// a foreign key failure when the category doesn't exist.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (category_id, name, description, unit_type, cost_price, sell_price) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(new.category_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.unit_type)
        .bind(&new.cost_price)
        .bind(&new.sell_price)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a partial update to a product.
    ///
    /// The read and the write run in one transaction with the row locked,
    /// so concurrent patches can't overwrite each other's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;
        let merged = current.merged(patch);

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products \
             SET category_id = $1, name = $2, description = $3, unit_type = $4, \
                 cost_price = $5, sell_price = $6, updated_at = now() \
             WHERE id = $7 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(merged.category_id)
        .bind(&merged.name)
        .bind(&merged.description)
        .bind(&merged.unit_type)
        .bind(&merged.cost_price)
        .bind(&merged.sell_price)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Delete a product by its ID.
    ///
    /// Cascades to the product's inventory records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Repository for product category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ProductCategory>, RepositoryError> {
        let categories = sqlx::query_as::<_, ProductCategory>(
            "SELECT id, name FROM product_categories ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a category by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<ProductCategory>, RepositoryError> {
        let category = sqlx::query_as::<_, ProductCategory>(
            "SELECT id, name FROM product_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        new: &NewProductCategory,
    ) -> Result<ProductCategory, RepositoryError> {
        let category = sqlx::query_as::<_, ProductCategory>(
            "INSERT INTO product_categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&new.name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "category already exists"))?;

        Ok(category)
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<ProductCategory, RepositoryError> {
        let category = sqlx::query_as::<_, ProductCategory>(
            "UPDATE product_categories SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "category already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(category)
    }

    /// Delete a category by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors,
    /// including a foreign key failure when products still reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product_categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_selects_everything() {
        let filter = ProductFilter::default();
        let query = filtered_query(&filter);
        let sql = query.sql();
        assert!(sql.contains("FROM products WHERE 1=1 ORDER BY created_at DESC"));
        assert!(!sql.contains('$'));
    }

    #[test]
    fn test_filter_binds_in_order() {
        let filter = ProductFilter {
            category_id: Some(CategoryId::generate()),
            name: Some("rice".to_owned()),
            sell_price: Some("100".to_owned()),
            ..ProductFilter::default()
        };
        let query = filtered_query(&filter);
        let sql = query.sql();
        assert!(sql.contains("category_id = $1"));
        assert!(sql.contains("name ILIKE $2"));
        assert!(sql.contains("sell_price::numeric <= $3::numeric"));
        assert!(!sql.contains("cost_price"));
    }

    #[test]
    fn test_price_filters_cast_to_numeric() {
        let filter = ProductFilter {
            cost_price: Some("25.50".to_owned()),
            ..ProductFilter::default()
        };
        let sql_query = filtered_query(&filter);
        assert!(
            sql_query
                .sql()
                .contains("cost_price::numeric <= $1::numeric")
        );
    }
}
