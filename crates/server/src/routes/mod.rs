//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth (no session required)
//! POST /api/v1/auth/operatorCode    - Validate an operator code field
//! POST /api/v1/auth/password        - Validate a password field
//! POST /api/v1/auth/login           - Log in
//! POST /api/v1/auth/logout          - Log out (destroys session)
//! GET  /api/v1/auth/check-session   - Check session liveness
//!
//! # Operators (session required)
//! GET    /api/v1/operators              - List operators
//! POST   /api/v1/operators              - Create person + operator atomically
//! GET    /api/v1/operators/{id}         - Get by ID
//! GET    /api/v1/operators/code/{code}  - Get by login code
//! PATCH  /api/v1/operators/{id}         - Partial update
//! DELETE /api/v1/operators/{id}         - Delete
//!
//! # Persons, products, categories, inventory (session required)
//! Standard list/get/create/patch/delete under /api/v1/persons,
//! /api/v1/products, /api/v1/categories, and /api/v1/inventory.
//! Product listing accepts query filters (id, categoryId, name,
//! costPrice, sellPrice).
//! ```

pub mod auth;
pub mod inventory;
pub mod operators;
pub mod persons;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/operatorCode", post(auth::validate_operator_code))
        .route("/password", post(auth::validate_password))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check-session", get(auth::check_session))
}

/// Create the operator routes router.
pub fn operator_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(operators::list).post(operators::create))
        .route("/code/{code}", get(operators::get_by_code))
        .route(
            "/{id}",
            get(operators::get)
                .patch(operators::update)
                .delete(operators::delete),
        )
}

/// Create the person routes router.
pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(persons::list).post(persons::create))
        .route(
            "/{id}",
            get(persons::get)
                .patch(persons::update)
                .delete(persons::delete),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::get)
                .patch(products::update)
                .delete(products::delete),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_categories).post(products::create_category),
        )
        .route(
            "/{id}",
            get(products::get_category)
                .patch(products::update_category)
                .delete(products::delete_category),
        )
}

/// Create the inventory routes router.
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list).post(inventory::create))
        .route(
            "/{id}",
            get(inventory::get)
                .patch(inventory::update)
                .delete(inventory::delete),
        )
}

/// Create all API routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/operators", operator_routes())
        .nest("/persons", person_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/inventory", inventory_routes());

    Router::new().nest("/api/v1", api)
}
