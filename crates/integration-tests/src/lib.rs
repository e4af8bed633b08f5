//! Integration tests for the sari backend.
//!
//! # Running Tests
//!
//! In-process router tests run with plain `cargo test` and need no
//! database; the pool is created lazily and the exercised endpoints
//! never touch it.
//!
//! End-to-end tests are `#[ignore]`d and require a running server plus a
//! migrated database:
//!
//! ```bash
//! cargo run -p sari-cli -- migrate
//! cargo run -p sari-server &
//! cargo test -p sari-integration-tests -- --ignored
//! ```

use secrecy::SecretString;

use sari_server::config::ServerConfig;
use sari_server::state::AppState;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SARI_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build an [`AppState`] with a lazy pool that never connects.
///
/// Suitable for exercising endpoints that don't reach the database.
///
/// # Panics
///
/// Panics if the placeholder connection string fails to parse.
#[must_use]
pub fn lazy_state() -> AppState {
    let config = ServerConfig {
        database_url: SecretString::from("postgres://localhost/sari_test"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kJ8#mQ2$vR5^xT9&wZ3*bN6!cF4@dG7%"),
        cross_site: false,
        cors_origin: None,
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/sari_test")
        .expect("lazy pool");

    AppState::new(config, pool)
}
