//! End-to-end authentication flow tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p sari-server)
//! - A seeded operator whose credentials are provided via
//!   `SARI_TEST_OPERATOR_CODE` and `SARI_TEST_PASSWORD`
//!
//! Run with: cargo test -p sari-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use sari_integration_tests::base_url;

/// Create a client with a cookie store, for session continuity.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

fn test_credentials() -> (String, String) {
    let code = std::env::var("SARI_TEST_OPERATOR_CODE").expect("SARI_TEST_OPERATOR_CODE not set");
    let password = std::env::var("SARI_TEST_PASSWORD").expect("SARI_TEST_PASSWORD not set");
    (code, password)
}

async fn login(client: &Client) -> Value {
    let (code, password) = test_credentials();
    let resp = client
        .post(format!("{}/api/v1/auth/login", base_url()))
        .json(&json!({"operatorCode": code, "password": password}))
        .send()
        .await
        .expect("login request");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("login body")
}

#[tokio::test]
#[ignore = "Requires running server and seeded operator"]
async fn test_login_logout_cycle() {
    let client = client();

    let body = login(&client).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["redirect"], "/home");
    assert!(body["data"]["operator"]["code"].is_string());
    // Password material never crosses the wire
    assert!(body["data"]["operator"].get("password").is_none());
    assert!(body["data"]["operator"].get("passwordHash").is_none());

    // Session is now live
    let resp = client
        .get(format!("{}/api/v1/auth/check-session", base_url()))
        .send()
        .await
        .expect("check-session request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("check-session body");
    assert_eq!(body["data"]["redirect"], "/dashboard");

    // Logout kills it
    let resp = client
        .post(format!("{}/api/v1/auth/logout", base_url()))
        .send()
        .await
        .expect("logout request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("logout body");
    assert_eq!(body["data"]["redirect"], "/login");

    let resp = client
        .get(format!("{}/api/v1/auth/check-session", base_url()))
        .send()
        .await
        .expect("check-session request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and seeded operator"]
async fn test_wrong_credentials_are_indistinguishable() {
    let client = client();

    let unknown_code = client
        .post(format!("{}/api/v1/auth/login", base_url()))
        .json(&json!({"operatorCode": "OP-00000000", "password": "Str0ng!Pass"}))
        .send()
        .await
        .expect("login request");
    assert_eq!(unknown_code.status(), StatusCode::NOT_FOUND);
    let unknown_body: Value = unknown_code.json().await.expect("body");

    let (code, _) = test_credentials();
    let wrong_password = client
        .post(format!("{}/api/v1/auth/login", base_url()))
        .json(&json!({"operatorCode": code, "password": "Wr0ng!Pass"}))
        .send()
        .await
        .expect("login request");
    assert_eq!(wrong_password.status(), StatusCode::NOT_FOUND);
    let wrong_body: Value = wrong_password.json().await.expect("body");

    assert_eq!(unknown_body["message"], wrong_body["message"]);
}

#[tokio::test]
#[ignore = "Requires running server and seeded operator"]
async fn test_login_short_circuits_when_authenticated() {
    let client = client();
    login(&client).await;

    // Second login with garbage credentials still succeeds
    let resp = client
        .post(format!("{}/api/v1/auth/login", base_url()))
        .json(&json!({"operatorCode": "", "password": ""}))
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("body");
    assert_eq!(body["message"], "Already authenticated");
    // The short-circuit still reports who is logged in
    let (code, _) = test_credentials();
    assert_eq!(body["data"]["operator"]["code"], code);
    assert_eq!(body["data"]["redirect"], "/home");
}

#[tokio::test]
#[ignore = "Requires running server and seeded operator"]
async fn test_operator_crud_requires_auth() {
    let resp = client()
        .get(format!("{}/api/v1/operators", base_url()))
        .send()
        .await
        .expect("operators request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let authed = client();
    login(&authed).await;
    let resp = authed
        .get(format!("{}/api/v1/operators", base_url()))
        .send()
        .await
        .expect("operators request");
    // At least the seeded operator exists
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("body");
    assert_eq!(body["message"], "Operators fetched successfully");
}
