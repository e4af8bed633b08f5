//! Sari server library.
//!
//! This crate provides the admin backend as a library, allowing it to be
//! tested and reused from the CLI (migrations, seeding).
//!
//! # Architecture
//!
//! - Axum web framework with JSON envelope responses
//! - `PostgreSQL` via sqlx for entities and sessions
//! - tower-sessions for cookie-based session authentication

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
