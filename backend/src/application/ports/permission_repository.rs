use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Permission;
use crate::domain::value_objects::{PermissionRole, SnippetId, UserId};

#[derive(Debug, Error)]
pub enum StorageError {
    /// A permission already exists for the (snippet, user) pair. The store
    /// enforces this itself; callers may pre-check, but this is the
    /// authoritative answer under concurrent inserts.
    #[error("permission already stored for snippet {snippet_id} and user {user_id}")]
    DuplicateKey { snippet_id: String, user_id: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Keyed store of permissions. Every operation is individually atomic; no
/// ordering is guaranteed across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn insert(&self, permission: &Permission) -> Result<(), StorageError>;

    async fn find_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<Option<Permission>, StorageError>;

    async fn exists_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<bool, StorageError>;

    /// Exact-match lookup restricted to the given roles. Kept separate from
    /// [`find_by_pair`](Self::find_by_pair) so a write check is a single
    /// filtered query rather than check-then-inspect.
    async fn find_by_pair_with_role_in(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
        roles: &[PermissionRole],
    ) -> Result<Option<Permission>, StorageError>;

    async fn find_by_snippet(&self, snippet_id: &SnippetId) -> Result<Vec<Permission>, StorageError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Permission>, StorageError>;

    /// Overwrites role and updated_at in place; id and created_at are
    /// preserved.
    async fn update(&self, permission: &Permission) -> Result<(), StorageError>;

    async fn delete_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<(), StorageError>;
}
