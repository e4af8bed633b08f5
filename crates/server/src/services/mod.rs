//! Business logic services.

pub mod auth;
pub mod operator_creator;

pub use auth::{AuthError, AuthService};
pub use operator_creator::{OperatorCreationError, create_operator_with_person};
