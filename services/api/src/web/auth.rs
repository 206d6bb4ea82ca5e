//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user registration and login, plus the
//! session-token helpers they rely on.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;
use decision_mirror_core::ports::PortError;

/// Session tokens expire this many days after issuance. There is no refresh
/// mechanism; an expired token forces a fresh login.
const TOKEN_TTL_DAYS: i64 = 7;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Generic message body used by registration and every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// The payload carried by a signed session token. Validity is determined
/// purely by signature and expiry; the server keeps no session table and
/// cannot revoke a token early.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

//=========================================================================================
// Token Helpers
//=========================================================================================

/// Signs a session token for the given user, valid for `TOKEN_TTL_DAYS`.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: issued_at,
        exp: issued_at + Duration::days(TOKEN_TTL_DAYS).num_seconds(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies signature and expiry, returning the claims on success.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/register - Create a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 400, description = "User already exists", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<MessageResponse>)> {
    // 1. Reject duplicates up front. No normalization: emails differing in
    //    case are distinct accounts.
    match state.credentials.find_by_email(&req.email).await {
        Ok(_) => return Err(user_exists()),
        Err(PortError::NotFound(_)) => {}
        Err(e) => {
            error!("Failed to check for existing user: {:?}", e);
            return Err(server_error());
        }
    }

    // 2. Hash the password before it ever reaches the store.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            server_error()
        })?
        .to_string();

    // 3. Create the record. The store's unique constraint settles any race
    //    two concurrent registrations might have won past step 1.
    match state.credentials.create_user(&req.email, &password_hash).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                msg: "Registered! You can now log in.".to_string(),
            }),
        )),
        Err(PortError::AlreadyExists(_)) => Err(user_exists()),
        Err(e) => {
            error!("Failed to create user: {:?}", e);
            Err(server_error())
        }
    }
}

/// POST /api/auth/login - Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<MessageResponse>)> {
    // 1. Look up by exact email match. An unknown user and a wrong password
    //    produce the same response, so nothing leaks about which it was.
    let credentials = match state.credentials.find_by_email(&req.email).await {
        Ok(credentials) => credentials,
        Err(PortError::NotFound(_)) => return Err(invalid_credentials()),
        Err(e) => {
            error!("Failed to look up user: {:?}", e);
            return Err(server_error());
        }
    };

    // 2. Verify the password against the stored hash.
    let parsed_hash = PasswordHash::new(&credentials.password_hash).map_err(|e| {
        error!("Failed to parse stored password hash: {:?}", e);
        server_error()
    })?;

    let valid = Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_ok();
    if !valid {
        return Err(invalid_credentials());
    }

    // 3. Issue the signed session token.
    let token = issue_token(credentials.id, &state.config.jwt_secret).map_err(|e| {
        error!("Failed to sign session token: {:?}", e);
        server_error()
    })?;

    Ok(Json(TokenResponse { token }))
}

fn user_exists() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            msg: "User already exists".to_string(),
        }),
    )
}

fn invalid_credentials() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            msg: "Invalid credentials".to_string(),
        }),
    )
}

fn server_error() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse {
            msg: "Server error".to_string(),
        }),
    )
}

//=========================================================================================
// Tests
//=========================================================================================
