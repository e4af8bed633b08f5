//! Person repository for database operations.

use sqlx::{PgPool, Postgres, Transaction};

use sari_core::PersonId;

use super::RepositoryError;
use crate::models::{NewPerson, Person, PersonPatch};

const PERSON_COLUMNS: &str =
    "id, birthdate, first_name, last_name, middle_name, suffix, created_at, updated_at";

/// Repository for person database operations.
pub struct PersonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepository<'a> {
    /// Create a new person repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all persons, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Person>, RepositoryError> {
        let persons = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(persons)
    }

    /// Get a person by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PersonId) -> Result<Option<Person>, RepositoryError> {
        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(person)
    }

    /// Create a new person.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewPerson) -> Result<Person, RepositoryError> {
        let person = sqlx::query_as::<_, Person>(&format!(
            "INSERT INTO persons (birthdate, first_name, last_name, middle_name, suffix) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(new.birthdate)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.middle_name)
        .bind(&new.suffix)
        .fetch_one(self.pool)
        .await?;

        Ok(person)
    }

    /// Create a new person inside an open transaction.
    ///
    /// Used by the composite operator creator so person and operator commit
    /// or roll back together.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewPerson,
    ) -> Result<Person, RepositoryError> {
        let person = sqlx::query_as::<_, Person>(&format!(
            "INSERT INTO persons (birthdate, first_name, last_name, middle_name, suffix) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(new.birthdate)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.middle_name)
        .bind(&new.suffix)
        .fetch_one(&mut **tx)
        .await?;

        Ok(person)
    }

    /// Apply a partial update to a person.
    ///
    /// The read and the write run in one transaction with the row locked,
    /// so concurrent patches can't overwrite each other's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the person doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: PersonId,
        patch: &PersonPatch,
    ) -> Result<Person, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;
        let merged = current.merged(patch);

        let person = sqlx::query_as::<_, Person>(&format!(
            "UPDATE persons \
             SET birthdate = $1, first_name = $2, last_name = $3, \
                 middle_name = $4, suffix = $5, updated_at = now() \
             WHERE id = $6 \
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(merged.birthdate)
        .bind(&merged.first_name)
        .bind(&merged.last_name)
        .bind(&merged.middle_name)
        .bind(&merged.suffix)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(person)
    }

    /// Delete a person by their ID.
    ///
    /// Cascades to the person's operator.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the person doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PersonId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
