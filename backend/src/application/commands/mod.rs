// Permission service operations, one command per module

pub mod check_permission;
pub mod check_write_permission;
pub mod create_permission;
pub mod delete_permission;
pub mod list_permissions_by_snippet;
pub mod list_permissions_by_user;
pub mod update_permission;

#[cfg(test)]
mod tests {
    use shared::protocol::{CreatePermissionRequest, PermissionRole};

    use super::{
        check_permission, check_write_permission, create_permission, delete_permission,
        update_permission,
    };
    use crate::domain::value_objects::{SnippetId, UserId};
    use crate::infrastructure::driven::persistence::InMemoryPermissionRepository;

    #[tokio::test]
    async fn full_permission_lifecycle() {
        let repo = InMemoryPermissionRepository::new();
        let snippet = SnippetId::new("s1");
        let user = UserId::new("u1");

        create_permission::execute(
            &repo,
            CreatePermissionRequest {
                snippet_id: "s1".to_string(),
                user_id: "u1".to_string(),
                role: PermissionRole::Owner,
            },
        )
        .await
        .unwrap();

        let check = check_permission::execute(&repo, &snippet, &user).await.unwrap();
        assert!(check.has_permission);
        assert_eq!(check.role, Some(PermissionRole::Owner));
        assert!(check_write_permission::execute(&repo, &snippet, &user).await.unwrap());

        let updated = update_permission::execute(&repo, &snippet, &user, PermissionRole::Read)
            .await
            .unwrap();
        assert_eq!(updated.role, PermissionRole::Read);
        assert!(!check_write_permission::execute(&repo, &snippet, &user).await.unwrap());

        delete_permission::execute(&repo, &snippet, &user).await.unwrap();
        let check = check_permission::execute(&repo, &snippet, &user).await.unwrap();
        assert!(!check.has_permission);
        assert_eq!(check.role, None);
    }
}
