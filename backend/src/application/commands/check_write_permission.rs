use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::value_objects::{PermissionRole, SnippetId, UserId};

/// True iff the pair holds OWNER or WRITE. Goes through the role-filtered
/// lookup so a READ grant can never satisfy a write check.
pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    snippet_id: &SnippetId,
    user_id: &UserId,
) -> Result<bool, PermissionError> {
    let permission = repo
        .find_by_pair_with_role_in(
            snippet_id,
            user_id,
            &[PermissionRole::Owner, PermissionRole::Write],
        )
        .await?;
    let has_write = permission.is_some();
    tracing::debug!(
        "Write permission check: snippet {snippet_id}, user {user_id}, result: {has_write}"
    );
    Ok(has_write)
}

#[cfg(test)]
mod tests {
    use shared::protocol::CreatePermissionRequest;

    use super::*;
    use crate::application::commands::create_permission;
    use crate::application::ports::permission_repository::MockPermissionRepository;
    use crate::infrastructure::driven::persistence::InMemoryPermissionRepository;

    #[tokio::test]
    async fn truth_table_over_stored_roles() {
        let repo = InMemoryPermissionRepository::new();
        for (snippet_id, user_id, role) in [
            ("snippet1", "owner", PermissionRole::Owner),
            ("snippet2", "writer", PermissionRole::Write),
            ("snippet3", "reader", PermissionRole::Read),
        ] {
            create_permission::execute(
                &repo,
                CreatePermissionRequest {
                    snippet_id: snippet_id.to_string(),
                    user_id: user_id.to_string(),
                    role,
                },
            )
            .await
            .unwrap();
        }

        assert!(execute(&repo, &SnippetId::new("snippet1"), &UserId::new("owner")).await.unwrap());
        assert!(execute(&repo, &SnippetId::new("snippet2"), &UserId::new("writer")).await.unwrap());
        assert!(!execute(&repo, &SnippetId::new("snippet3"), &UserId::new("reader")).await.unwrap());
        assert!(!execute(&repo, &SnippetId::new("snippet4"), &UserId::new("nobody")).await.unwrap());
    }

    #[tokio::test]
    async fn uses_the_role_filtered_lookup() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_find_by_pair_with_role_in()
            .withf(|_, _, roles| roles == [PermissionRole::Owner, PermissionRole::Write])
            .times(1)
            .returning(|_, _, _| Ok(None));
        repo.expect_find_by_pair().never();

        let has_write = execute(&repo, &SnippetId::new("snippet1"), &UserId::new("user1"))
            .await
            .unwrap();
        assert!(!has_write);
    }
}
