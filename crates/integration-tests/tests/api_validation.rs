//! In-process router tests for validation and auth-guard behavior.
//!
//! These exercise the real router with a lazy pool; none of the
//! endpoints tested here reach the database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use sari_integration_tests::lazy_state;
use sari_server::{middleware, routes};

fn app() -> Router {
    let state = lazy_state();
    let session_layer = middleware::create_session_layer(state.pool(), state.config());
    routes::routes().layer(session_layer).with_state(state)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn test_operator_code_valid() {
    let (status, body) = post_json(
        app(),
        "/api/v1/auth/operatorCode",
        json!({"operatorCode": "OP-1A2B3C4D"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Operator code is valid");
}

#[tokio::test]
async fn test_operator_code_wrong_length() {
    let (status, body) = post_json(
        app(),
        "/api/v1/auth/operatorCode",
        json!({"operatorCode": "OP-1A2B"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_operator_code_bad_prefix() {
    let (status, _body) = post_json(
        app(),
        "/api/v1/auth/operatorCode",
        json!({"operatorCode": "XX-1A2B3C4D"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_password_valid() {
    let (status, body) = post_json(
        app(),
        "/api/v1/auth/password",
        json!({"password": "Str0ng!Pass"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password is valid");
}

#[tokio::test]
async fn test_password_missing_symbol() {
    let (status, body) = post_json(
        app(),
        "/api/v1/auth/password",
        json!({"password": "Str0ngPass1"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Password must contain at least one special character"
    );
}

#[tokio::test]
async fn test_password_too_short() {
    let (status, _body) = post_json(
        app(),
        "/api/v1/auth/password",
        json!({"password": "S1!a"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_route_requires_session() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/operators")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(value["message"], "Session expired");
    assert_eq!(value["data"]["redirect"], "/login");
}

#[tokio::test]
async fn test_check_session_without_cookie() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/auth/check-session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(value["data"]["redirect"], "/login");
}
