//! Database operations for the sari backend.
//!
//! ## Tables
//!
//! - `persons` - Biographical records backing operators
//! - `operators` - Authentication principals (code + password hash)
//! - `product_categories` - Product classification
//! - `products` - Catalog entries (prices as numeric-as-text)
//! - `inventories` - Per-product stock levels
//! - `sessions` - Session storage (tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p sari-cli -- migrate
//! ```
//!
//! All queries use the runtime sqlx API; domain models derive
//! `sqlx::FromRow` directly since the ID newtypes implement the sqlx
//! traits.

pub mod inventory;
pub mod operators;
pub mod persons;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use inventory::InventoryRepository;
pub use operators::OperatorRepository;
pub use persons::PersonRepository;
pub use products::{CategoryRepository, ProductRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique operator code).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a sqlx error, turning a unique violation into [`RepositoryError::Conflict`].
pub(crate) fn map_unique_violation(e: sqlx::Error, conflict: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict.to_owned());
    }
    RepositoryError::Database(e)
}
