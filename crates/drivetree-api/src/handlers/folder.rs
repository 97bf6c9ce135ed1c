//! Folder handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{create_folder_request, move_request, rename_request};
use crate::dto::response::{ApiResponse, DeletedResponse, FolderContentsResponse, FolderResponse};
use crate::error::ApiError;
use crate::extractors::{ActingUser, JsonBody, PathParams};
use crate::state::AppState;

/// GET /user/{userId}/folder
pub async fn list_root(
    State(state): State<AppState>,
    user: ActingUser,
) -> Result<Json<ApiResponse<FolderContentsResponse>>, ApiError> {
    let contents = state.folder_service.list_root(&user).await?;
    Ok(Json(ApiResponse::ok(contents.into())))
}

/// POST /user/{userId}/folder
pub async fn create_folder(
    State(state): State<AppState>,
    user: ActingUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<FolderResponse>>, ApiError> {
    let req = create_folder_request(&body)?;
    let folder = state.folder_service.create_folder(&user, req).await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// GET /user/{userId}/folder/{folderId}
pub async fn get_folder(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
) -> Result<Json<ApiResponse<FolderContentsResponse>>, ApiError> {
    let folder_id = params.uuid("folderId")?;
    let contents = state.folder_service.get_contents(&user, folder_id).await?;
    Ok(Json(ApiResponse::ok(contents.into())))
}

/// PUT /user/{userId}/folder/{folderId}
pub async fn rename_folder(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<FolderResponse>>, ApiError> {
    let folder_id = params.uuid("folderId")?;
    let name = rename_request(&body)?;
    let folder = state
        .folder_service
        .rename_folder(&user, folder_id, &name)
        .await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// PATCH /user/{userId}/folder/{folderId}
pub async fn move_folder(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<FolderResponse>>, ApiError> {
    let folder_id = params.uuid("folderId")?;
    let parent_id = move_request(&body, "parentId")?;
    let folder = state
        .folder_service
        .move_folder(&user, folder_id, parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// DELETE /user/{userId}/folder/{folderId}
pub async fn delete_folder(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let folder_id = params.uuid("folderId")?;
    let deleted = state.folder_service.delete_folder(&user, folder_id).await?;
    Ok(Json(ApiResponse::ok(deleted.into())))
}
