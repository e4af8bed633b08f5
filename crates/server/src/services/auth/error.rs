//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No operator with the given code.
    ///
    /// Rendered identically to [`AuthError::InvalidPassword`] so a probe
    /// can't distinguish an unknown code from a wrong password.
    #[error("operator not found")]
    OperatorNotFound,

    /// Stored hash doesn't match the given password.
    #[error("invalid password")]
    InvalidPassword,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
