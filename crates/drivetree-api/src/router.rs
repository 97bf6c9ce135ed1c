//! Route table.

use axum::Router;
use axum::routing::{delete, get, post};

use crate::handlers::{self, file, folder, health, share};
use crate::state::AppState;

/// Builds the route table. Every item route is scoped to the acting user.
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        // ── Folders ──────────────────────────────────────────────
        .route(
            "/folder",
            get(folder::list_root).post(folder::create_folder),
        )
        .route(
            "/folder/{folderId}",
            get(folder::get_folder)
                .put(folder::rename_folder)
                .patch(folder::move_folder)
                .delete(folder::delete_folder),
        )
        .route("/folder/{folderId}/share", post(share::share_folder))
        .route(
            "/folder/{folderId}/share/{targetId}",
            delete(share::unshare_folder),
        )
        // ── Files ────────────────────────────────────────────────
        .route("/file", post(file::create_file))
        .route(
            "/file/{fileId}",
            get(file::get_file)
                .put(file::rename_file)
                .patch(file::move_file)
                .delete(file::delete_file),
        )
        .route("/file/{fileId}/share", post(share::share_file))
        .route(
            "/file/{fileId}/share/{targetId}",
            delete(share::unshare_file),
        )
        // ── Sharing ──────────────────────────────────────────────
        .route("/shared", get(share::list_shared));

    Router::new()
        .route("/health", get(health::health))
        .nest("/user/{userId}", user_routes)
        .fallback(handlers::not_found)
        .with_state(state)
}
