use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::value_objects::{SnippetId, UserId};

pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    snippet_id: &SnippetId,
    user_id: &UserId,
) -> Result<(), PermissionError> {
    // Callers must learn whether something was actually removed, so
    // existence is checked explicitly before the delete.
    if !repo.exists_by_pair(snippet_id, user_id).await? {
        tracing::warn!(
            "Attempt to delete missing permission for snippet {snippet_id} and user {user_id}"
        );
        return Err(PermissionError::NotFound {
            snippet_id: snippet_id.to_string(),
            user_id: user_id.to_string(),
        });
    }

    repo.delete_by_pair(snippet_id, user_id).await?;
    tracing::info!("Permission deleted for snippet {snippet_id} and user {user_id}");
    Ok(())
}
