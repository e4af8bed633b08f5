//! Operator management routes.
//!
//! Operator creation is composite: one request creates the person and
//! the operator atomically, with the login code generated server-side.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use sari_core::{OperatorId, Password};

use crate::db::OperatorRepository;
use crate::error::AppError;
use crate::middleware::RequireOperatorAuth;
use crate::models::{NewOperator, NewPerson, OperatorPatch};
use crate::response::ApiResponse;
use crate::services::{auth::hash_password, create_operator_with_person};
use crate::state::AppState;

/// Composite create request body: `{ "data": { "person": ..., "operator": ... } }`.
#[derive(Debug, Deserialize)]
pub struct CreateOperatorRequest {
    #[serde(default)]
    pub data: Option<CreateOperatorData>,
}

/// The person and operator halves of a composite create.
#[derive(Debug, Deserialize)]
pub struct CreateOperatorData {
    #[serde(default)]
    pub person: Option<NewPerson>,
    #[serde(default)]
    pub operator: Option<NewOperator>,
}

/// List all operators.
///
/// GET /api/v1/operators
///
/// # Errors
///
/// Returns `AppError::NotFound` when no operators exist.
pub async fn list(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
) -> Result<ApiResponse, AppError> {
    let operators = OperatorRepository::new(state.pool()).list_all().await?;

    if operators.is_empty() {
        return Err(AppError::NotFound("No operators found".to_owned()));
    }

    Ok(ApiResponse::ok("Operators fetched successfully")
        .with_data(json!({ "operators": operators })))
}

/// Get an operator by ID.
///
/// GET /api/v1/operators/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the operator doesn't exist.
pub async fn get(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<OperatorId>,
) -> Result<ApiResponse, AppError> {
    let operator = OperatorRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Operator not found".to_owned()))?;

    Ok(ApiResponse::ok("Operator fetched successfully")
        .with_data(json!({ "operator": operator })))
}

/// Get an operator by login code.
///
/// GET /api/v1/operators/code/{code}
///
/// # Errors
///
/// Returns `AppError::NotFound` when no operator has the code.
pub async fn get_by_code(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(code): Path<String>,
) -> Result<ApiResponse, AppError> {
    let operator = OperatorRepository::new(state.pool())
        .get_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Operator not found".to_owned()))?;

    Ok(ApiResponse::ok("Operator fetched successfully")
        .with_data(json!({ "operator": operator })))
}

/// Create a person and operator atomically.
///
/// POST /api/v1/operators
///
/// # Errors
///
/// Returns `AppError::BadRequest` when either half of the body is missing.
/// Returns `AppError::Validation` when the password fails validation.
pub async fn create(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Json(body): Json<CreateOperatorRequest>,
) -> Result<ApiResponse, AppError> {
    let data = body
        .data
        .ok_or_else(|| AppError::BadRequest("Operator data is required".to_owned()))?;
    let new_operator = data
        .operator
        .ok_or_else(|| AppError::BadRequest("Operator data is required".to_owned()))?;
    let new_person = data
        .person
        .ok_or_else(|| AppError::BadRequest("Person data is required".to_owned()))?;

    let password =
        Password::parse(&new_operator.password).map_err(|e| AppError::Validation(e.to_string()))?;

    let (person, operator) =
        create_operator_with_person(state.pool(), &new_person, &password).await?;

    tracing::info!(operator_code = %operator.code, "operator created");

    Ok(ApiResponse::created("Operator created successfully")
        .with_data(json!({ "person": person, "operator": operator })))
}

/// Apply a partial update to an operator.
///
/// PATCH /api/v1/operators/{id}
///
/// # Errors
///
/// Returns `AppError::Validation` when a new password fails validation.
/// Returns `AppError::NotFound` when the operator doesn't exist.
pub async fn update(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<OperatorId>,
    Json(patch): Json<OperatorPatch>,
) -> Result<ApiResponse, AppError> {
    let password_hash = match &patch.password {
        Some(plain) => {
            let password =
                Password::parse(plain).map_err(|e| AppError::Validation(e.to_string()))?;
            Some(hash_password(&password)?)
        }
        None => None,
    };

    let operator = OperatorRepository::new(state.pool())
        .update(id, patch.person_id, password_hash.as_deref())
        .await?;

    Ok(ApiResponse::ok("Operator updated successfully")
        .with_data(json!({ "operator": operator })))
}

/// Delete an operator.
///
/// DELETE /api/v1/operators/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` when the operator doesn't exist.
pub async fn delete(
    State(state): State<AppState>,
    RequireOperatorAuth(_current): RequireOperatorAuth,
    Path(id): Path<OperatorId>,
) -> Result<ApiResponse, AppError> {
    OperatorRepository::new(state.pool()).delete(id).await?;

    Ok(ApiResponse::ok("Operator deleted successfully"))
}
