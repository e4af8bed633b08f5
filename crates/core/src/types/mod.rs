//! Core types for Sari.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod operator_code;
pub mod password;

pub use id::*;
pub use operator_code::{OperatorCode, OperatorCodeError};
pub use password::{Password, PasswordError};
