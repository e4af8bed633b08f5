//! Unified error handling.
//!
//! Every handler returns `Result<_, AppError>`; the single `IntoResponse`
//! implementation here renders each variant into the JSON envelope, so
//! handlers never format error bodies themselves.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::response::ApiResponse;
use crate::services::auth::AuthError;
use crate::services::operator_creator::OperatorCreationError;

/// Message returned for failed logins regardless of which credential was
/// wrong.
pub const CREDENTIALS_DONT_EXIST: &str = "Given credentials don't exist";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication failed.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Request body or parameter failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but not allowed to do this. No current
    /// endpoint raises it; kept so permission tiers slot in without a
    /// taxonomy change.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<OperatorCreationError> for AppError {
    fn from(e: OperatorCreationError) -> Self {
        match e {
            OperatorCreationError::Auth(auth) => Self::Auth(auth),
            OperatorCreationError::Repository(repo) => Self::Database(repo),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let envelope = match &self {
            Self::Database(RepositoryError::NotFound) => {
                ApiResponse::not_found("Resource not found")
            }
            Self::Database(RepositoryError::Conflict(message)) => {
                ApiResponse::conflict(message.clone())
            }
            Self::Database(_) | Self::Internal(_) => {
                ApiResponse::internal_server_error("Internal server error")
            }
            // Unknown code and wrong password render identically.
            Self::Auth(AuthError::OperatorNotFound | AuthError::InvalidPassword) => {
                ApiResponse::not_found(CREDENTIALS_DONT_EXIST)
            }
            Self::Auth(AuthError::PasswordHash | AuthError::Repository(_)) => {
                ApiResponse::internal_server_error("Internal server error")
            }
            Self::Validation(message) | Self::BadRequest(message) => {
                ApiResponse::bad_request(message.clone())
            }
            Self::NotFound(message) => ApiResponse::not_found(message.clone()),
            Self::Unauthorized(message) => ApiResponse::unauthorized(message.clone()),
            Self::Forbidden(message) => ApiResponse::forbidden(message.clone()),
        };

        envelope.into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_credential_errors_are_indistinguishable() {
        let not_found = AppError::Auth(AuthError::OperatorNotFound).into_response();
        let bad_password = AppError::Auth(AuthError::InvalidPassword).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(bad_password.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "operator already exists".to_owned()
            ))),
            StatusCode::CONFLICT
        );
    }
}
