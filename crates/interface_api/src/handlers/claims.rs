//! Claims handlers

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::{ClaimId, ItemId};
use domain_claims::ClaimAmendment;

use crate::auth::AuthenticatedUser;
use crate::dto::claims::*;
use crate::dto::{ListResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{JsonBody, Path};
use crate::AppState;

/// Claims an item for the caller
pub async fn submit_claim(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    JsonBody(request): JsonBody<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimMutationResponse>), ApiError> {
    let claim = state.claims.submit(&actor, request.item_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ClaimMutationResponse::new("Claim submitted successfully", claim)),
    ))
}

pub async fn get_claim(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimDetailsResponse>, ApiError> {
    let details = state.claims.get(&actor, id).await?;
    Ok(Json(details.into()))
}

/// Staff verification outcome
pub async fn verify_claim(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ClaimId>,
    JsonBody(request): JsonBody<VerifyClaimRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    let status = request.status()?;
    let claim = state
        .claims
        .verify(&actor, id, status, request.verification_notes)
        .await?;
    Ok(Json(ClaimMutationResponse::new(
        "Claim verification updated successfully",
        claim,
    )))
}

pub async fn update_claim(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ClaimId>,
    JsonBody(request): JsonBody<UpdateClaimRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    let amendment = ClaimAmendment::try_from(request)?;
    let claim = state.claims.amend(&actor, id, amendment).await?;
    Ok(Json(ClaimMutationResponse::new("Claim updated successfully", claim)))
}

/// Withdraws a pending claim
pub async fn delete_claim(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ClaimId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.claims.cancel(&actor, id).await?;
    Ok(Json(MessageResponse::new("Claim deleted successfully")))
}

/// Claims where the caller is claimer or item owner
pub async fn my_claims(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<Json<ListResponse<ClaimDetailsResponse>>, ApiError> {
    let claims = state.claims.mine(&actor).await?;
    Ok(Json(ListResponse::new(
        claims.into_iter().map(Into::into).collect(),
    )))
}

pub async fn item_claims(
    State(state): State<AppState>,
    AuthenticatedUser(_actor): AuthenticatedUser,
    Path(item_id): Path<ItemId>,
) -> Result<Json<ListResponse<ClaimDetailsResponse>>, ApiError> {
    let claims = state.claims.for_item(item_id).await?;
    Ok(Json(ListResponse::new(
        claims.into_iter().map(Into::into).collect(),
    )))
}
