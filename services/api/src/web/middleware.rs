//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::web::auth::verify_token;
use crate::web::state::AppState;

/// Middleware that validates the bearer session token and extracts the user id.
///
/// If the signature and expiry check out, the user id is inserted into
/// request extensions for handlers to use. Otherwise the request is rejected
/// with 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract the Authorization header.
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Pull the bearer token out of it.
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 3. Verify signature and expiry.
    let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
        debug!("Rejecting request with invalid session token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // 4. Insert the user id into request extensions.
    req.extensions_mut().insert(claims.sub);

    // 5. Continue to the handler.
    Ok(next.run(req).await)
}
