//! Authentication routes.
//!
//! JSON API endpoints for credential validation, login, logout, and
//! session checks. Field validators exist so the frontend can check a
//! single input without submitting the whole login form.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use sari_core::{OperatorCode, Password};

use crate::error::AppError;
use crate::middleware::{OptionalOperatorAuth, set_current_operator};
use crate::models::CurrentOperator;
use crate::response::ApiResponse;
use crate::services::AuthService;
use crate::state::AppState;

/// Request to validate an operator code field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorCodeRequest {
    #[serde(default)]
    pub operator_code: String,
}

/// Request to validate a password field.
#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    #[serde(default)]
    pub password: String,
}

/// Login credentials.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub operator_code: String,
    #[serde(default)]
    pub password: String,
}

/// Validate an operator code without logging in.
///
/// POST /api/v1/auth/operatorCode
///
/// # Errors
///
/// Returns `AppError::Validation` with the format error message.
pub async fn validate_operator_code(
    Json(body): Json<OperatorCodeRequest>,
) -> Result<ApiResponse, AppError> {
    OperatorCode::parse(&body.operator_code)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(ApiResponse::ok("Operator code is valid"))
}

/// Validate a password without logging in.
///
/// POST /api/v1/auth/password
///
/// # Errors
///
/// Returns `AppError::Validation` with the first violated rule's message.
pub async fn validate_password(
    Json(body): Json<PasswordRequest>,
) -> Result<ApiResponse, AppError> {
    Password::parse(&body.password).map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(ApiResponse::ok("Password is valid"))
}

/// Log in with an operator code and password.
///
/// POST /api/v1/auth/login
///
/// An already-authenticated caller short-circuits to a success response
/// without re-checking credentials. Both credentials are validated for
/// format before the database is consulted.
///
/// # Errors
///
/// Returns `AppError::Validation` for malformed credentials.
/// Returns `AppError::Auth` (rendered as 404) for wrong credentials.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    OptionalOperatorAuth(current): OptionalOperatorAuth,
    Json(body): Json<LoginRequest>,
) -> Result<ApiResponse, AppError> {
    if let Some(identity) = current {
        return Ok(ApiResponse::ok("Already authenticated")
            .with_data(json!({ "operator": identity, "redirect": "/home" })));
    }

    let code =
        OperatorCode::parse(&body.operator_code).map_err(|e| AppError::Validation(e.to_string()))?;
    Password::parse(&body.password).map_err(|e| AppError::Validation(e.to_string()))?;

    let auth = AuthService::new(state.pool());
    let operator = auth.login(code.as_ref(), &body.password).await?;

    let identity = CurrentOperator::from(&operator);
    set_current_operator(&session, &identity)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(operator_code = %operator.code, "operator logged in");

    Ok(ApiResponse::ok("Logged in successfully")
        .with_data(json!({ "operator": operator, "redirect": "/home" })))
}

/// Log out and destroy the session.
///
/// POST /api/v1/auth/logout
///
/// Always succeeds, even when nobody was logged in.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn logout(session: Session) -> Result<ApiResponse, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(ApiResponse::ok("Logged out successfully").with_data(json!({ "redirect": "/login" })))
}

/// Check whether the caller has a live session.
///
/// GET /api/v1/auth/check-session
///
/// Re-resolves the stored identity against the database so a deleted
/// operator's session dies immediately.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when no valid session exists.
pub async fn check_session(
    State(state): State<AppState>,
    session: Session,
    OptionalOperatorAuth(current): OptionalOperatorAuth,
) -> Result<ApiResponse, AppError> {
    let Some(identity) = current else {
        return Ok(ApiResponse::unauthorized("Session expired")
            .with_data(json!({ "redirect": "/login" })));
    };

    let auth = AuthService::new(state.pool());
    let Some(operator) = auth.resolve(identity.id).await? else {
        // Operator deleted since login; kill the stale session.
        session
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
        return Ok(ApiResponse::unauthorized("Session expired")
            .with_data(json!({ "redirect": "/login" })));
    };

    Ok(ApiResponse::ok("Session is active")
        .with_data(json!({ "user": operator, "redirect": "/dashboard" })))
}
