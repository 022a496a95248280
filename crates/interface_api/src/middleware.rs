//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use core_kernel::Actor;

use crate::auth::{bearer_token, validate_token, AuthError};
use crate::AppState;

/// Authentication middleware
///
/// Attaches the caller's [`Actor`] when a valid bearer token is present.
/// Requests without one pass through; protected handlers reject them via
/// [`AuthenticatedUser`](crate::auth::AuthenticatedUser).
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let verified = bearer_token(request.headers())
        .and_then(|token| validate_token(token, &state.config.jwt_secret));

    match verified {
        Ok(claims) => {
            request.extensions_mut().insert(claims.actor());
        }
        Err(AuthError::MissingToken) => {}
        Err(e) => {
            warn!(error = %e, uri = %request.uri(), "Token validation failed");
            request.extensions_mut().insert(e);
        }
    }

    next.run(request).await
}

/// Audit logging middleware
///
/// Logs every API request with the caller, outcome and latency.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<Actor>()
        .map(|actor| actor.user_id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
