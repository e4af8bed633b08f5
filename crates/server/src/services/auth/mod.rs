//! Authentication service.
//!
//! Operators log in with their generated code and a password. Password
//! hashes use Argon2id with per-password salts.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use sari_core::{OperatorId, Password};

use crate::db::OperatorRepository;
use crate::models::Operator;

/// Authentication service.
///
/// Handles credential verification and session identity resolution.
pub struct AuthService<'a> {
    operators: OperatorRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            operators: OperatorRepository::new(pool),
        }
    }

    /// Verify an operator code and password pair.
    ///
    /// Returns the operator on success. An unknown code and a wrong
    /// password are separate variants internally but must be rendered
    /// the same way to the client.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::OperatorNotFound` if no operator has the code.
    /// Returns `AuthError::InvalidPassword` if the password doesn't match.
    /// Returns `AuthError::Repository` if a database operation fails.
    pub async fn login(&self, code: &str, password: &str) -> Result<Operator, AuthError> {
        let credentials = self
            .operators
            .get_credentials_by_code(code)
            .await?
            .ok_or(AuthError::OperatorNotFound)?;

        verify_password(password, &credentials.password_hash)?;

        self.operators
            .get_by_id(credentials.id)
            .await?
            .ok_or(AuthError::OperatorNotFound)
    }

    /// Resolve a session identity back to a live operator row.
    ///
    /// Returns `None` when the operator has been deleted since the session
    /// was issued; callers should flush the session in that case.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn resolve(&self, id: OperatorId) -> Result<Option<Operator>, AuthError> {
        Ok(self.operators.get_by_id(id).await?)
    }
}

/// Hash a validated password with Argon2id and a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &Password) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored Argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidPassword` if the hash is malformed or the
/// password doesn't match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidPassword)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidPassword)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = Password::parse("Str0ng!Pass").unwrap();
        let hash = hash_password(&password).unwrap();

        assert!(hash.starts_with("$argon2"));
        verify_password("Str0ng!Pass", &hash).unwrap();
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let password = Password::parse("Str0ng!Pass").unwrap();
        let hash = hash_password(&password).unwrap();

        assert!(matches!(
            verify_password("Wr0ng!Pass", &hash),
            Err(AuthError::InvalidPassword)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("Str0ng!Pass", "not-a-hash"),
            Err(AuthError::InvalidPassword)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = Password::parse("Str0ng!Pass").unwrap();
        let first = hash_password(&password).unwrap();
        let second = hash_password(&password).unwrap();
        assert_ne!(first, second);
    }
}
