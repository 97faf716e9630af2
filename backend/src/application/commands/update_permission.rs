use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::entities::Permission;
use crate::domain::value_objects::{PermissionRole, SnippetId, UserId};

pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    snippet_id: &SnippetId,
    user_id: &UserId,
    new_role: PermissionRole,
) -> Result<Permission, PermissionError> {
    let Some(mut permission) = repo.find_by_pair(snippet_id, user_id).await? else {
        tracing::warn!(
            "Attempt to update missing permission for snippet {snippet_id} and user {user_id}"
        );
        return Err(PermissionError::NotFound {
            snippet_id: snippet_id.to_string(),
            user_id: user_id.to_string(),
        });
    };

    let old_role = permission.role;
    permission.change_role(new_role);
    repo.update(&permission).await?;

    tracing::info!(
        "Permission updated: snippet {snippet_id}, user {user_id}, role {} -> {}",
        old_role.as_str(),
        new_role.as_str()
    );
    Ok(permission)
}

#[cfg(test)]
mod tests {
    use shared::protocol::CreatePermissionRequest;

    use super::*;
    use crate::application::commands::create_permission;
    use crate::infrastructure::driven::persistence::InMemoryPermissionRepository;

    #[tokio::test]
    async fn updates_role_and_advances_updated_at() {
        let repo = InMemoryPermissionRepository::new();
        let original = create_permission::execute(
            &repo,
            CreatePermissionRequest {
                snippet_id: "snippet1".to_string(),
                user_id: "user1".to_string(),
                role: PermissionRole::Read,
            },
        )
        .await
        .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));

        let updated = execute(
            &repo,
            &SnippetId::new("snippet1"),
            &UserId::new("user1"),
            PermissionRole::Write,
        )
        .await
        .unwrap();

        assert_eq!(updated.role, PermissionRole::Write);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);

        let stored = repo
            .find_by_pair(&updated.snippet_id, &updated.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn missing_pair_is_not_found() {
        let repo = InMemoryPermissionRepository::new();

        let result = execute(
            &repo,
            &SnippetId::new("nonexistent"),
            &UserId::new("nobody"),
            PermissionRole::Write,
        )
        .await;

        assert!(matches!(result, Err(PermissionError::NotFound { .. })));
    }
}
