//! Operator repository for database operations.
//!
//! Read queries never select the password hash; the authentication service
//! fetches credentials through a dedicated lookup.

use sqlx::{PgPool, Postgres, Transaction};

use sari_core::{OperatorCode, OperatorId, PersonId};

use super::{RepositoryError, map_unique_violation};
use crate::models::{Operator, OperatorCredentials};

const OPERATOR_COLUMNS: &str = "id, person_id, code, created_at, updated_at";

/// Repository for operator database operations.
pub struct OperatorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OperatorRepository<'a> {
    /// Create a new operator repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all operators, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Operator>, RepositoryError> {
        let operators = sqlx::query_as::<_, Operator>(&format!(
            "SELECT {OPERATOR_COLUMNS} FROM operators ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(operators)
    }

    /// Get an operator by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OperatorId) -> Result<Option<Operator>, RepositoryError> {
        let operator = sqlx::query_as::<_, Operator>(&format!(
            "SELECT {OPERATOR_COLUMNS} FROM operators WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(operator)
    }

    /// Get an operator by their login code.
    ///
    /// The code is matched as-is after trimming; a blank code short-circuits
    /// to `None` without touching the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Operator>, RepositoryError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let operator = sqlx::query_as::<_, Operator>(&format!(
            "SELECT {OPERATOR_COLUMNS} FROM operators WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(operator)
    }

    /// Get the stored credentials for an operator code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials_by_code(
        &self,
        code: &str,
    ) -> Result<Option<OperatorCredentials>, RepositoryError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let credentials = sqlx::query_as::<_, OperatorCredentials>(
            "SELECT id, password_hash FROM operators WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(credentials)
    }

    /// Create a new operator inside an open transaction.
    ///
    /// The password must already be hashed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code or person is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        person_id: PersonId,
        code: &OperatorCode,
        password_hash: &str,
    ) -> Result<Operator, RepositoryError> {
        let operator = sqlx::query_as::<_, Operator>(&format!(
            "INSERT INTO operators (person_id, code, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {OPERATOR_COLUMNS}"
        ))
        .bind(person_id)
        .bind(code)
        .bind(password_hash)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| map_unique_violation(e, "operator already exists"))?;

        Ok(operator)
    }

    /// Re-point an operator at a different person and/or replace their
    /// password hash. `None` fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the operator doesn't exist.
    /// Returns `RepositoryError::Conflict` if the person already has an operator.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: OperatorId,
        person_id: Option<PersonId>,
        password_hash: Option<&str>,
    ) -> Result<Operator, RepositoryError> {
        let operator = sqlx::query_as::<_, Operator>(&format!(
            "UPDATE operators \
             SET person_id = COALESCE($1, person_id), \
                 password_hash = COALESCE($2, password_hash), \
                 updated_at = now() \
             WHERE id = $3 \
             RETURNING {OPERATOR_COLUMNS}"
        ))
        .bind(person_id)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "person already has an operator"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(operator)
    }

    /// Delete an operator by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the operator doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OperatorId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM operators WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
