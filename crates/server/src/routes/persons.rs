//! Person management routes.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::json;

use sari_core::PersonId;

use crate::db::PersonRepository;
use crate::error::AppError;
use crate::middleware::RequireOperatorAuth;
use crate::models::{NewPerson, PersonPatch};
use crate::response::ApiResponse;
use crate::state::AppState;

/// List all persons.
///
/// GET /api/v1/persons
///
/// # Errors
///
/// Returns `AppError::NotFound` when no persons exist.
pub async fn list(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
) -> Result<ApiResponse, AppError> {
    let persons = PersonRepository::new(state.pool()).list_all().await?;

    if persons.is_empty() {
        return Err(AppError::NotFound("No persons found".to_owned()));
    }

    Ok(ApiResponse::ok("Persons fetched successfully").with_data(json!({ "persons": persons })))
}

/// Get a person by ID.
///
/// GET /api/v1/persons/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the person doesn't exist.
pub async fn get(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<PersonId>,
) -> Result<ApiResponse, AppError> {
    let person = PersonRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".to_owned()))?;

    Ok(ApiResponse::ok("Person fetched successfully").with_data(json!({ "person": person })))
}

/// Create a person.
///
/// POST /api/v1/persons
///
/// # Errors
///
/// Returns `AppError::Database` if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Json(new): Json<NewPerson>,
) -> Result<ApiResponse, AppError> {
    let person = PersonRepository::new(state.pool()).create(&new).await?;

    Ok(ApiResponse::created("Person created successfully").with_data(json!({ "person": person })))
}

/// Apply a partial update to a person.
///
/// PATCH /api/v1/persons/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the person doesn't exist.
pub async fn update(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<PersonId>,
    Json(patch): Json<PersonPatch>,
) -> Result<ApiResponse, AppError> {
    let person = PersonRepository::new(state.pool()).update(id, &patch).await?;

    Ok(ApiResponse::ok("Person updated successfully").with_data(json!({ "person": person })))
}

/// Delete a person.
///
/// DELETE /api/v1/persons/{id}
///
/// Cascades to the person's operator.
///
/// # Errors
///
/// Returns `AppError::NotFound` when the person doesn't exist.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<PersonId>,
) -> Result<ApiResponse, AppError> {
    PersonRepository::new(state.pool()).delete(id).await?;

    Ok(ApiResponse::ok("Person deleted successfully"))
}
