use shared::protocol::PermissionCheckResponse;

use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::value_objects::{SnippetId, UserId};

/// An absent pair is an answer, not a failure.
pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    snippet_id: &SnippetId,
    user_id: &UserId,
) -> Result<PermissionCheckResponse, PermissionError> {
    let permission = repo.find_by_pair(snippet_id, user_id).await?;
    let result = PermissionCheckResponse {
        has_permission: permission.is_some(),
        role: permission.map(|permission| permission.role),
    };
    tracing::debug!(
        "Permission check: snippet {snippet_id}, user {user_id}, has permission: {}",
        result.has_permission
    );
    Ok(result)
}
