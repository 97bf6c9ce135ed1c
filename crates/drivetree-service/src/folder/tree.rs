//! Ancestry checks over the folder tree.

use uuid::Uuid;

use drivetree_core::result::AppResult;
use drivetree_database::FolderStore;

/// Ids of the folders from the root down to and including `folder_id`.
pub async fn ancestor_ids(store: &dyn FolderStore, folder_id: Uuid) -> AppResult<Vec<Uuid>> {
    Ok(store
        .find_ancestors(folder_id)
        .await?
        .into_iter()
        .map(|f| f.id)
        .collect())
}

/// Whether `candidate` is `of` itself or sits anywhere below it.
pub async fn is_descendant_or_self(
    store: &dyn FolderStore,
    candidate: Uuid,
    of: Uuid,
) -> AppResult<bool> {
    if candidate == of {
        return Ok(true);
    }
    Ok(ancestor_ids(store, candidate).await?.contains(&of))
}
