//! Inventory management routes.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::json;

use sari_core::InventoryId;

use crate::db::InventoryRepository;
use crate::error::AppError;
use crate::middleware::RequireOperatorAuth;
use crate::models::{InventoryPatch, NewInventory};
use crate::response::ApiResponse;
use crate::state::AppState;

/// List all inventory records.
///
/// GET /api/v1/inventory
///
/// # Errors
///
/// Returns `AppError::NotFound` when no records exist.
pub async fn list(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
) -> Result<ApiResponse, AppError> {
    let inventories = InventoryRepository::new(state.pool()).list_all().await?;

    if inventories.is_empty() {
        return Err(AppError::NotFound("No inventories found".to_owned()));
    }

    Ok(ApiResponse::ok("Inventories fetched successfully")
        .with_data(json!({ "inventories": inventories })))
}

/// Get an inventory record by ID.
///
/// GET /api/v1/inventory/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the record doesn't exist.
pub async fn get(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<InventoryId>,
) -> Result<ApiResponse, AppError> {
    let inventory = InventoryRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory not found".to_owned()))?;

    Ok(ApiResponse::ok("Inventory fetched successfully")
        .with_data(json!({ "inventory": inventory })))
}

/// Create an inventory record.
///
/// POST /api/v1/inventory
///
/// # Errors
///
/// Returns `AppError::Database` (rendered 409) when the product already
/// has a record.
pub async fn create(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Json(new): Json<NewInventory>,
) -> Result<ApiResponse, AppError> {
    let inventory = InventoryRepository::new(state.pool()).create(&new).await?;

    Ok(ApiResponse::created("Inventory created successfully")
        .with_data(json!({ "inventory": inventory })))
}

/// Apply a partial update to an inventory record.
///
/// PATCH /api/v1/inventory/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the record doesn't exist.
pub async fn update(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<InventoryId>,
    Json(patch): Json<InventoryPatch>,
) -> Result<ApiResponse, AppError> {
    let inventory = InventoryRepository::new(state.pool())
        .update(id, &patch)
        .await?;

    Ok(ApiResponse::ok("Inventory updated successfully")
        .with_data(json!({ "inventory": inventory })))
}

/// Delete an inventory record.
///
/// DELETE /api/v1/inventory/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the record doesn't exist.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<InventoryId>,
) -> Result<ApiResponse, AppError> {
    InventoryRepository::new(state.pool()).delete(id).await?;

    Ok(ApiResponse::ok("Inventory deleted successfully"))
}
