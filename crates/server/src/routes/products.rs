//! Product and category management routes.
//!
//! Product listing accepts query-string filters; see
//! [`crate::models::ProductFilter`] for the supported fields.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;

use sari_core::{CategoryId, ProductId};

use crate::db::{CategoryRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::RequireOperatorAuth;
use crate::models::{NewProduct, NewProductCategory, ProductFilter, ProductPatch};
use crate::response::ApiResponse;
use crate::state::AppState;

/// List products, optionally filtered.
///
/// GET /api/v1/products?name=...&categoryId=...&costPrice=...&sellPrice=...
///
/// # Errors
///
/// Returns `AppError::NotFound` when nothing matches the filter.
pub async fn list(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Query(filter): Query<ProductFilter>,
) -> Result<ApiResponse, AppError> {
    let products = ProductRepository::new(state.pool()).list(&filter).await?;

    if products.is_empty() {
        return Err(AppError::NotFound("No products found".to_owned()));
    }

    Ok(ApiResponse::ok("Products fetched successfully")
        .with_data(json!({ "products": products })))
}

/// Get a product by ID.
///
/// GET /api/v1/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the product doesn't exist.
pub async fn get(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<ProductId>,
) -> Result<ApiResponse, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(ApiResponse::ok("Product fetched successfully").with_data(json!({ "product": product })))
}

/// Create a product.
///
/// POST /api/v1/products
///
/// # Errors
///
/// Returns `AppError::Database` if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Json(new): Json<NewProduct>,
) -> Result<ApiResponse, AppError> {
    let product = ProductRepository::new(state.pool()).create(&new).await?;

    Ok(ApiResponse::created("Product created successfully")
        .with_data(json!({ "product": product })))
}

/// Apply a partial update to a product.
///
/// PATCH /api/v1/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the product doesn't exist.
pub async fn update(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<ApiResponse, AppError> {
    let product = ProductRepository::new(state.pool()).update(id, &patch).await?;

    Ok(ApiResponse::ok("Product updated successfully").with_data(json!({ "product": product })))
}

/// Delete a product.
///
/// DELETE /api/v1/products/{id}
///
/// Cascades to the product's inventory records.
///
/// # Errors
///
/// Returns `AppError::NotFound` when the product doesn't exist.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<ProductId>,
) -> Result<ApiResponse, AppError> {
    ProductRepository::new(state.pool()).delete(id).await?;

    Ok(ApiResponse::ok("Product deleted successfully"))
}

// =============================================================================
// Categories
// =============================================================================

/// Category rename request.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
}

/// List all categories.
///
/// GET /api/v1/categories
///
/// # Errors
///
/// Returns `AppError::NotFound` when no categories exist.
pub async fn list_categories(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
) -> Result<ApiResponse, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;

    if categories.is_empty() {
        return Err(AppError::NotFound("No categories found".to_owned()));
    }

    Ok(ApiResponse::ok("Categories fetched successfully")
        .with_data(json!({ "categories": categories })))
}

/// Get a category by ID.
///
/// GET /api/v1/categories/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the category doesn't exist.
pub async fn get_category(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<CategoryId>,
) -> Result<ApiResponse, AppError> {
    let category = CategoryRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))?;

    Ok(ApiResponse::ok("Category fetched successfully")
        .with_data(json!({ "category": category })))
}

/// Create a category.
///
/// POST /api/v1/categories
///
/// # Errors
///
/// Returns `AppError::Database` (rendered 409) when the name exists.
pub async fn create_category(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Json(new): Json<NewProductCategory>,
) -> Result<ApiResponse, AppError> {
    let category = CategoryRepository::new(state.pool()).create(&new).await?;

    Ok(ApiResponse::created("Category created successfully")
        .with_data(json!({ "category": category })))
}

/// Rename a category.
///
/// PATCH /api/v1/categories/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the category doesn't exist.
pub async fn update_category(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<CategoryId>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<ApiResponse, AppError> {
    let category = CategoryRepository::new(state.pool())
        .update(id, &body.name)
        .await?;

    Ok(ApiResponse::ok("Category updated successfully")
        .with_data(json!({ "category": category })))
}

/// Delete a category.
///
/// DELETE /api/v1/categories/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the category doesn't exist.
/// Returns `AppError::Database` when products still reference it.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<CategoryId>,
) -> Result<ApiResponse, AppError> {
    CategoryRepository::new(state.pool()).delete(id).await?;

    Ok(ApiResponse::ok("Category deleted successfully"))
}
