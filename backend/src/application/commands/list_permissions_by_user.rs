use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::entities::Permission;
use crate::domain::value_objects::UserId;

pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    user_id: &UserId,
) -> Result<Vec<Permission>, PermissionError> {
    let permissions = repo.find_by_user(user_id).await?;
    tracing::debug!("Fetched {} permissions for user {user_id}", permissions.len());
    Ok(permissions)
}

#[cfg(test)]
mod tests {
    use shared::protocol::{CreatePermissionRequest, PermissionRole};

    use super::*;
    use crate::application::commands::create_permission;
    use crate::infrastructure::driven::persistence::InMemoryPermissionRepository;

    #[tokio::test]
    async fn returns_exactly_the_matching_user_permissions() {
        let repo = InMemoryPermissionRepository::new();
        for (snippet_id, user_id) in [
            ("snippet1", "user1"),
            ("snippet2", "other"),
            ("snippet3", "user1"),
        ] {
            create_permission::execute(
                &repo,
                CreatePermissionRequest {
                    snippet_id: snippet_id.to_string(),
                    user_id: user_id.to_string(),
                    role: PermissionRole::Write,
                },
            )
            .await
            .unwrap();
        }

        let permissions = execute(&repo, &UserId::new("user1")).await.unwrap();

        let snippets: Vec<&str> = permissions.iter().map(|p| p.snippet_id.as_str()).collect();
        assert_eq!(snippets, vec!["snippet1", "snippet3"]);
    }
}
