//! File handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{create_file_request, move_request, rename_request};
use crate::dto::response::{ApiResponse, FileResponse};
use crate::error::ApiError;
use crate::extractors::{ActingUser, JsonBody, PathParams};
use crate::state::AppState;

/// POST /user/{userId}/file
pub async fn create_file(
    State(state): State<AppState>,
    user: ActingUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let req = create_file_request(&body)?;
    let file = state.file_service.create_file(&user, req).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// GET /user/{userId}/file/{fileId}
pub async fn get_file(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file_id = params.uuid("fileId")?;
    let file = state.file_service.get_file(&user, file_id).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// PUT /user/{userId}/file/{fileId}
pub async fn rename_file(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file_id = params.uuid("fileId")?;
    let name = rename_request(&body)?;
    let file = state.file_service.rename_file(&user, file_id, &name).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// PATCH /user/{userId}/file/{fileId}
pub async fn move_file(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file_id = params.uuid("fileId")?;
    let folder_id = move_request(&body, "folderId")?;
    let file = state.file_service.move_file(&user, file_id, folder_id).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// DELETE /user/{userId}/file/{fileId}
pub async fn delete_file(
    State(state): State<AppState>,
    user: ActingUser,
    params: PathParams,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file_id = params.uuid("fileId")?;
    let file = state.file_service.delete_file(&user, file_id).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}
