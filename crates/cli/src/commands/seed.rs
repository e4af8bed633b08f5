//! Seed the first operator.
//!
//! The API requires a session to create operators, so the very first one
//! has to come from outside the API. This command creates a person and
//! operator in one transaction and prints the generated login code.
//!
//! # Usage
//!
//! ```bash
//! sari-cli seed operator -f Maria -l Santos -b 1990-04-12 -p 'Str0ng!Pass'
//! ```
//!
//! # Environment Variables
//!
//! - `SARI_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use chrono::NaiveDate;
use secrecy::SecretString;
use thiserror::Error;

use sari_core::{Password, PasswordError};
use sari_server::db;
use sari_server::models::NewPerson;
use sari_server::services::{OperatorCreationError, create_operator_with_person};

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Birthdate is not a valid YYYY-MM-DD date.
    #[error("Invalid birthdate: {0}. Expected YYYY-MM-DD")]
    InvalidBirthdate(String),

    /// Password failed validation.
    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creation failed.
    #[error("Creation error: {0}")]
    Creation(#[from] OperatorCreationError),
}

/// Create a person and operator, printing the generated login code.
///
/// # Errors
///
/// Returns `SeedError` if inputs fail validation or the database
/// operations fail.
pub async fn operator(
    first_name: &str,
    last_name: &str,
    birthdate: &str,
    password: &str,
) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SARI_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("SARI_DATABASE_URL"))?;

    let birthdate = birthdate
        .parse::<NaiveDate>()
        .map_err(|_| SeedError::InvalidBirthdate(birthdate.to_owned()))?;
    let password = Password::parse(password)?;

    let new_person = NewPerson {
        birthdate,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        middle_name: None,
        suffix: None,
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let (person, operator) = create_operator_with_person(&pool, &new_person, &password).await?;

    tracing::info!(person_id = %person.id, operator_id = %operator.id, "operator seeded");

    #[allow(clippy::print_stdout)]
    {
        println!("Operator created for {} {}", person.first_name, person.last_name);
        println!("Login code: {}", operator.code);
    }

    Ok(())
}
