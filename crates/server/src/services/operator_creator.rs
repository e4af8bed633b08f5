//! Composite operator creation.
//!
//! An operator always references exactly one person, so the two rows are
//! created in a single transaction. If either insert fails the whole
//! creation rolls back and no partial state is left behind.

use sqlx::PgPool;

use sari_core::{OperatorCode, Password};

use crate::db::{OperatorRepository, PersonRepository, RepositoryError};
use crate::models::{NewPerson, Operator, Person};
use crate::services::auth::{AuthError, hash_password};

/// Errors that can occur during composite operator creation.
#[derive(Debug, thiserror::Error)]
pub enum OperatorCreationError {
    /// Password validation or hashing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Repository/database error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Create a person and their operator atomically.
///
/// The operator code is generated server-side and the password must already
/// be validated. Returns both created rows.
///
/// # Errors
///
/// Returns `OperatorCreationError::Auth` if password hashing fails.
/// Returns `OperatorCreationError::Repository` if either insert fails; the
/// transaction rolls back on drop.
pub async fn create_operator_with_person(
    pool: &PgPool,
    new_person: &NewPerson,
    password: &Password,
) -> Result<(Person, Operator), OperatorCreationError> {
    let password_hash = hash_password(password)?;
    let code = OperatorCode::generate();

    let mut tx = pool.begin().await.map_err(RepositoryError::Database)?;

    let person = PersonRepository::create_in_tx(&mut tx, new_person).await?;
    let operator =
        OperatorRepository::create_in_tx(&mut tx, person.id, &code, &password_hash).await?;

    tx.commit().await.map_err(RepositoryError::Database)?;

    Ok((person, operator))
}
