//! Integration tests for the registration and login handlers, driven
//! directly against an in-memory credential store.

mod common;

use api_lib::web::auth::{
    login_handler, register_handler, verify_token, LoginRequest, RegisterRequest,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use common::{test_state, MemoryCredentialStore, TEST_SECRET};
use std::sync::Arc;

fn register_request(email: &str, password: &str) -> Json<RegisterRequest> {
    Json(RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn login_request(email: &str, password: &str) -> Json<LoginRequest> {
    Json(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let store = Arc::new(MemoryCredentialStore::new());
    let state = test_state(store.clone());

    let (status, Json(body)) = register_handler(
        State(state.clone()),
        register_request("ada@example.com", "hunter2hunter2"),
    )
    .await
    .expect("registration should succeed");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.msg, "Registered! You can now log in.");
    assert_eq!(store.user_count().await, 1);

    let Json(token_body) = login_handler(
        State(state),
        login_request("ada@example.com", "hunter2hunter2"),
    )
    .await
    .expect("login should succeed");
    assert!(
        verify_token(&token_body.token, TEST_SECRET).is_ok(),
        "issued token should verify against the signing secret"
    );
}

#[tokio::test]
async fn duplicate_registration_is_rejected_and_adds_exactly_one_row() {
    let store = Arc::new(MemoryCredentialStore::new());
    let state = test_state(store.clone());

    register_handler(
        State(state.clone()),
        register_request("ada@example.com", "first-password"),
    )
    .await
    .expect("first registration should succeed");

    let (status, Json(body)) = register_handler(
        State(state),
        register_request("ada@example.com", "second-password"),
    )
    .await
    .expect_err("second registration should be rejected");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.msg, "User already exists");
    assert_eq!(store.user_count().await, 1, "row count must grow by exactly one");
}

#[tokio::test]
async fn emails_differing_in_case_are_distinct_accounts() {
    let store = Arc::new(MemoryCredentialStore::new());
    let state = test_state(store.clone());

    register_handler(
        State(state.clone()),
        register_request("Ada@example.com", "password-one"),
    )
    .await
    .expect("first registration should succeed");
    register_handler(
        State(state),
        register_request("ada@example.com", "password-two"),
    )
    .await
    .expect("differently-cased email should register separately");

    assert_eq!(store.user_count().await, 2);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let store = Arc::new(MemoryCredentialStore::new());
    let state = test_state(store);

    register_handler(
        State(state.clone()),
        register_request("ada@example.com", "the-real-password"),
    )
    .await
    .expect("registration should succeed");

    let (wrong_status, Json(wrong_body)) = login_handler(
        State(state.clone()),
        login_request("ada@example.com", "not-the-password"),
    )
    .await
    .expect_err("wrong password should be rejected");

    let (missing_status, Json(missing_body)) = login_handler(
        State(state),
        login_request("nobody@example.com", "whatever"),
    )
    .await
    .expect_err("unknown email should be rejected");

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_status, wrong_status);
    assert_eq!(
        wrong_body.msg, missing_body.msg,
        "responses must not reveal whether the account exists"
    );
    assert_eq!(wrong_body.msg, "Invalid credentials");
}

#[tokio::test]
async fn login_token_carries_a_seven_day_expiry() {
    let store = Arc::new(MemoryCredentialStore::new());
    let state = test_state(store);

    register_handler(
        State(state.clone()),
        register_request("ada@example.com", "hunter2hunter2"),
    )
    .await
    .expect("registration should succeed");

    let Json(token_body) = login_handler(
        State(state),
        login_request("ada@example.com", "hunter2hunter2"),
    )
    .await
    .expect("login should succeed");

    let claims = verify_token(&token_body.token, TEST_SECRET).expect("token should verify");
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[tokio::test]
async fn concurrent_duplicate_registration_creates_one_account() {
    let store = Arc::new(MemoryCredentialStore::new());
    let state = test_state(store.clone());

    let (first, second) = tokio::join!(
        register_handler(
            State(state.clone()),
            register_request("ada@example.com", "password-one"),
        ),
        register_handler(
            State(state.clone()),
            register_request("ada@example.com", "password-two"),
        ),
    );

    let successes = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1, "exactly one concurrent registration may win");
    assert_eq!(store.user_count().await, 1);
}
