//! Account handlers

use axum::{extract::State, http::StatusCode, Json};

use domain_identity::User;

use crate::auth::{create_token, AuthenticatedUser};
use crate::dto::auth::*;
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::AppState;

fn session(state: &AppState, message: &str, user: User) -> Result<SessionResponse, ApiError> {
    let token = create_token(
        user.id,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )?;

    Ok(SessionResponse {
        message: message.to_string(),
        user: user.into(),
        token,
    })
}

/// Registers a student account and signs it in
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let user = state.accounts.register(request.into()).await?;
    let body = session(&state, "User registered successfully", user)?;
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await?;
    Ok(Json(session(&state, "Login successful", user)?))
}

/// Profile of the caller
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state.accounts.profile(actor.user_id).await?;
    Ok(Json(ProfileResponse {
        success: true,
        user: user.into(),
    }))
}
