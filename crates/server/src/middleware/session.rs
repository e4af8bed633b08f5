//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions with a 24hr
//! inactivity expiry.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sari.sid";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// When `cross_site` is enabled the cookie is sent with `SameSite=None`
/// so a frontend on a different origin can authenticate; this requires
/// HTTPS in any modern browser.
///
/// # Panics
///
/// Panics if the table name is invalid (should never happen with the
/// hardcoded "sessions" value).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ServerConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The sessions table is created via migration.
    let store = PostgresStore::new(pool.clone())
        .with_table_name("sessions")
        .expect("valid table name");

    let same_site = if config.cross_site {
        tower_sessions::cookie::SameSite::None
    } else {
        tower_sessions::cookie::SameSite::Lax
    };

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_https())
        .with_same_site(same_site)
        .with_http_only(true)
        .with_path("/")
}
