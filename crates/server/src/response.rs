//! JSON response envelope.
//!
//! Every endpoint responds with the same envelope shape:
//!
//! ```json
//! {
//!   "statusCode": 200,
//!   "success": true,
//!   "message": "Operators fetched successfully",
//!   "data": { ... },
//!   "errors": { ... }
//! }
//! ```
//!
//! `success` is derived from the status code (2xx), and `data`/`errors`
//! are omitted entirely when absent.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// The uniform JSON envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code, duplicated in the body.
    pub status_code: u16,
    /// `true` for 2xx status codes.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Response payload, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error detail payload, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ApiResponse {
    /// Build an envelope for an arbitrary status code.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            success: status.is_success(),
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// 200 OK.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }

    /// 201 Created.
    #[must_use]
    pub fn created(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, message)
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Attach a payload.
    ///
    /// Serialization failures collapse to `null` rather than erroring;
    /// every payload type used with this envelope serializes infallibly.
    #[must_use]
    pub fn with_data(mut self, data: impl Serialize) -> Self {
        self.data = Some(serde_json::to_value(data).unwrap_or(Value::Null));
        self
    }

    /// Attach error details.
    #[must_use]
    pub fn with_errors(mut self, errors: impl Serialize) -> Self {
        self.errors = Some(serde_json::to_value(errors).unwrap_or(Value::Null));
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
