//! Share handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::share_request;
use crate::dto::response::{ApiResponse, ShareResponse, SharedItemsResponse};
use crate::error::ApiError;
use crate::extractors::{ActingUser, JsonBody, PathParams};
use crate::state::AppState;

/// POST /user/{userId}/folder/{folderId}/share
pub async fn share_folder(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<ShareResponse>>, ApiError> {
    let folder_id = params.uuid("folderId")?;
    let target = share_request(&body)?;
    let share = state
        .share_service
        .share_folder(&user, folder_id, target)
        .await?;
    Ok(Json(ApiResponse::ok(share.into())))
}

/// DELETE /user/{userId}/folder/{folderId}/share/{targetId}
pub async fn unshare_folder(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let folder_id = params.uuid("folderId")?;
    let target = params.uuid("targetId")?;
    state
        .share_service
        .unshare_folder(&user, folder_id, target)
        .await?;
    Ok(Json(ApiResponse::ok(true)))
}

/// POST /user/{userId}/file/{fileId}/share
pub async fn share_file(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<ShareResponse>>, ApiError> {
    let file_id = params.uuid("fileId")?;
    let target = share_request(&body)?;
    let share = state.share_service.share_file(&user, file_id, target).await?;
    Ok(Json(ApiResponse::ok(share.into())))
}

/// DELETE /user/{userId}/file/{fileId}/share/{targetId}
pub async fn unshare_file(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let file_id = params.uuid("fileId")?;
    let target = params.uuid("targetId")?;
    state
        .share_service
        .unshare_file(&user, file_id, target)
        .await?;
    Ok(Json(ApiResponse::ok(true)))
}

/// GET /user/{userId}/shared
pub async fn list_shared(
    State(state): State<AppState>,
    user: ActingUser,
) -> Result<Json<ApiResponse<SharedItemsResponse>>, ApiError> {
    let shared = state.share_service.list_shared_with_me(&user).await?;
    Ok(Json(ApiResponse::ok(shared.into())))
}
