//! Sari Core - Shared types library.
//!
//! This crate provides common types used across all Sari components:
//! - `server` - Session-authenticated admin backend
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, operator codes, and
//!   password validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
