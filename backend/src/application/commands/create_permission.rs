use shared::protocol::CreatePermissionRequest;

use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::entities::Permission;
use crate::domain::value_objects::{SnippetId, UserId};

pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    request: CreatePermissionRequest,
) -> Result<Permission, PermissionError> {
    if request.snippet_id.trim().is_empty() {
        return Err(PermissionError::Validation {
            field: "snippet_id",
            message: "Snippet ID cannot be null or empty",
        });
    }
    if request.user_id.trim().is_empty() {
        return Err(PermissionError::Validation {
            field: "user_id",
            message: "User ID cannot be null or empty",
        });
    }

    let snippet_id = SnippetId::new(request.snippet_id);
    let user_id = UserId::new(request.user_id);

    tracing::debug!("Checking for existing permission for snippet {snippet_id} and user {user_id}");
    if repo.find_by_pair(&snippet_id, &user_id).await?.is_some() {
        tracing::warn!(
            "Attempt to create duplicate permission for snippet {snippet_id} and user {user_id}"
        );
        return Err(PermissionError::Duplicate {
            snippet_id: snippet_id.to_string(),
            user_id: user_id.to_string(),
        });
    }

    let permission = Permission::grant(snippet_id, user_id, request.role);
    // The pre-check above is only an optimization; the store's uniqueness
    // guard decides the race between concurrent creates for the same pair.
    repo.insert(&permission).await?;

    tracing::info!(
        "Permission created: id {}, snippet {}, user {}, role {}",
        permission.id,
        permission.snippet_id,
        permission.user_id,
        permission.role.as_str()
    );
    Ok(permission)
}
