//! Authentication middleware and extractors.
//!
//! Provides an extractor for requiring operator authentication in route
//! handlers, plus helpers for reading and writing the session identity.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentOperator, session_keys};
use crate::response::ApiResponse;

/// Extractor that requires operator authentication.
///
/// Rejects with a 401 envelope carrying a login redirect when no valid
/// session identity is present, and with a 500 envelope when the session
/// store itself fails.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireOperatorAuth(operator): RequireOperatorAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", operator.code)
/// }
/// ```
pub struct RequireOperatorAuth(pub CurrentOperator);

/// Rejection returned when operator authentication cannot be established.
pub enum OperatorAuthRejection {
    /// No session identity; the caller must log in.
    Unauthenticated,
    /// The session store failed; not the caller's fault.
    Store,
}

impl IntoResponse for OperatorAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => ApiResponse::unauthorized("Session expired")
                .with_data(json!({ "redirect": "/login" }))
                .into_response(),
            Self::Store => {
                ApiResponse::internal_server_error("Internal server error").into_response()
            }
        }
    }
}

/// Read the session identity, mapping store failures to a 500 rejection.
async fn read_identity(session: &Session) -> Result<Option<CurrentOperator>, OperatorAuthRejection> {
    session
        .get(session_keys::CURRENT_OPERATOR)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "session store error");
            OperatorAuthRejection::Store
        })
}

impl<S> FromRequestParts<S> for RequireOperatorAuth
where
    S: Send + Sync,
{
    type Rejection = OperatorAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(OperatorAuthRejection::Unauthenticated)?;

        let operator = read_identity(session)
            .await?
            .ok_or(OperatorAuthRejection::Unauthenticated)?;

        Ok(Self(operator))
    }
}

/// Extractor that optionally gets the current operator.
///
/// Unlike [`RequireOperatorAuth`], this does not reject the request when
/// nobody is logged in. Used by login to short-circuit for already
/// authenticated callers. A session store failure still rejects with a
/// 500 envelope.
pub struct OptionalOperatorAuth(pub Option<CurrentOperator>);

impl<S> FromRequestParts<S> for OptionalOperatorAuth
where
    S: Send + Sync,
{
    type Rejection = OperatorAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let operator = match parts.extensions.get::<Session>() {
            Some(session) => read_identity(session).await?,
            None => None,
        };

        Ok(Self(operator))
    }
}

/// Store the operator identity in the session after a successful login.
///
/// # Errors
///
/// Returns `tower_sessions::session::Error` if the session store fails.
pub async fn set_current_operator(
    session: &Session,
    operator: &CurrentOperator,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_OPERATOR, operator)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_unauthenticated_rejection_is_401_with_redirect() {
        let response = OperatorAuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Session expired");
        assert_eq!(value["data"]["redirect"], "/login");
        assert_eq!(value["success"], false);
    }

    #[tokio::test]
    async fn test_store_rejection_is_500_without_redirect() {
        let response = OperatorAuthRejection::Store.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Internal server error");
        assert!(value.get("data").is_none());
    }
}
