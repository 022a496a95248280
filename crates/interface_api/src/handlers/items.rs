//! Item handlers

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::{Actor, ItemId};
use domain_items::{ItemReport, ItemUpdate};

use crate::auth::AuthenticatedUser;
use crate::dto::items::*;
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query, ValidatedJson};
use crate::AppState;

/// Filtered, paginated listing; public
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<ItemListResponse>, ApiError> {
    let filter = query.into_filter(state.config.max_page_size)?;
    let page = state.items.list(&filter).await?;
    Ok(Json(page.into()))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<ItemDetailsResponse>, ApiError> {
    let details = state.items.details(id).await?;
    Ok(Json(details.into()))
}

async fn report(
    state: &AppState,
    actor: &Actor,
    request: ReportItemRequest,
    lost: bool,
) -> Result<(StatusCode, Json<ItemMutationResponse>), ApiError> {
    let report = ItemReport::try_from(request)?;
    let item = if lost {
        state.items.report_lost(actor, report).await?
    } else {
        state.items.report_found(actor, report).await?
    };

    Ok((
        StatusCode::CREATED,
        Json(ItemMutationResponse::new("Item reported successfully", item)),
    ))
}

pub async fn report_found(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ReportItemRequest>,
) -> Result<(StatusCode, Json<ItemMutationResponse>), ApiError> {
    report(&state, &actor, request, false).await
}

pub async fn report_lost(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ReportItemRequest>,
) -> Result<(StatusCode, Json<ItemMutationResponse>), ApiError> {
    report(&state, &actor, request, true).await
}

/// Partial update; reporter or staff
pub async fn update_item(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ItemId>,
    ValidatedJson(request): ValidatedJson<UpdateItemRequest>,
) -> Result<Json<ItemMutationResponse>, ApiError> {
    let update = ItemUpdate::try_from(request)?;
    let item = state.items.update(&actor, id, update).await?;
    Ok(Json(ItemMutationResponse::new("Item updated successfully", item)))
}

/// Staff status override
pub async fn set_item_status(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ItemId>,
    JsonBody(request): JsonBody<ItemStatusRequest>,
) -> Result<Json<ItemMutationResponse>, ApiError> {
    let item = state.items.set_status(&actor, id, request.status()?).await?;
    Ok(Json(ItemMutationResponse::new("Item status updated successfully", item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<ItemId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.items.delete(&actor, id).await?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}
