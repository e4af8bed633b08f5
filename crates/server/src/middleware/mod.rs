//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. CORS layer (only when a cross-site frontend origin is configured)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Auth extractors (per-handler, not router-wide)

pub mod auth;
pub mod session;

pub use auth::{OptionalOperatorAuth, RequireOperatorAuth, set_current_operator};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
