use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::{PermissionRepository, StorageError};
use crate::domain::entities::Permission;
use crate::domain::value_objects::{PermissionRole, SnippetId, UserId};

/// Reference implementation of the storage contract, used by the test
/// suite. A single write lock makes the existence check and the insert one
/// atomic step, giving the same uniqueness guarantee as the production
/// store's UNIQUE constraint. The backing `Vec` keeps insertion order, which
/// is the stable storage order the scans report.
#[derive(Default)]
pub struct InMemoryPermissionRepository {
    permissions: RwLock<Vec<Permission>>,
}

impl InMemoryPermissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Backend("permission store lock poisoned".to_string())
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn insert(&self, permission: &Permission) -> Result<(), StorageError> {
        let mut permissions = self.permissions.write().map_err(poisoned)?;
        if permissions
            .iter()
            .any(|p| p.snippet_id == permission.snippet_id && p.user_id == permission.user_id)
        {
            return Err(StorageError::DuplicateKey {
                snippet_id: permission.snippet_id.to_string(),
                user_id: permission.user_id.to_string(),
            });
        }
        permissions.push(permission.clone());
        Ok(())
    }

    async fn find_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<Option<Permission>, StorageError> {
        let permissions = self.permissions.read().map_err(poisoned)?;
        Ok(permissions
            .iter()
            .find(|p| p.snippet_id == *snippet_id && p.user_id == *user_id)
            .cloned())
    }

    async fn exists_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<bool, StorageError> {
        let permissions = self.permissions.read().map_err(poisoned)?;
        Ok(permissions
            .iter()
            .any(|p| p.snippet_id == *snippet_id && p.user_id == *user_id))
    }

    async fn find_by_pair_with_role_in(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
        roles: &[PermissionRole],
    ) -> Result<Option<Permission>, StorageError> {
        let permissions = self.permissions.read().map_err(poisoned)?;
        Ok(permissions
            .iter()
            .find(|p| {
                p.snippet_id == *snippet_id && p.user_id == *user_id && roles.contains(&p.role)
            })
            .cloned())
    }

    async fn find_by_snippet(
        &self,
        snippet_id: &SnippetId,
    ) -> Result<Vec<Permission>, StorageError> {
        let permissions = self.permissions.read().map_err(poisoned)?;
        Ok(permissions
            .iter()
            .filter(|p| p.snippet_id == *snippet_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Permission>, StorageError> {
        let permissions = self.permissions.read().map_err(poisoned)?;
        Ok(permissions
            .iter()
            .filter(|p| p.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, permission: &Permission) -> Result<(), StorageError> {
        let mut permissions = self.permissions.write().map_err(poisoned)?;
        if let Some(slot) = permissions
            .iter_mut()
            .find(|p| p.snippet_id == permission.snippet_id && p.user_id == permission.user_id)
        {
            *slot = permission.clone();
        }
        Ok(())
    }

    async fn delete_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<(), StorageError> {
        let mut permissions = self.permissions.write().map_err(poisoned)?;
        permissions.retain(|p| !(p.snippet_id == *snippet_id && p.user_id == *user_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(snippet_id: &str, user_id: &str, role: PermissionRole) -> Permission {
        Permission::grant(SnippetId::new(snippet_id), UserId::new(user_id), role)
    }

    #[tokio::test]
    async fn insert_rejects_an_existing_pair() {
        let repo = InMemoryPermissionRepository::new();
        repo.insert(&permission("s1", "u1", PermissionRole::Owner)).await.unwrap();

        let result = repo.insert(&permission("s1", "u1", PermissionRole::Read)).await;
        assert!(matches!(result, Err(StorageError::DuplicateKey { .. })));

        // Same snippet, different user is a different pair.
        repo.insert(&permission("s1", "u2", PermissionRole::Read)).await.unwrap();
    }

    #[tokio::test]
    async fn scans_report_insertion_order() {
        let repo = InMemoryPermissionRepository::new();
        repo.insert(&permission("s1", "u2", PermissionRole::Read)).await.unwrap();
        repo.insert(&permission("s2", "u1", PermissionRole::Read)).await.unwrap();
        repo.insert(&permission("s1", "u1", PermissionRole::Read)).await.unwrap();

        let found = repo.find_by_snippet(&SnippetId::new("s1")).await.unwrap();
        let users: Vec<&str> = found.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(users, vec!["u2", "u1"]);
    }
}
