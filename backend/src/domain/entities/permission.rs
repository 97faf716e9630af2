use crate::domain::value_objects::*;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single role grant for one user over one snippet. At most one permission
/// exists per (snippet, user) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    pub id: Uuid,
    pub snippet_id: SnippetId,
    pub user_id: UserId,
    pub role: PermissionRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    pub fn grant(snippet_id: SnippetId, user_id: UserId, role: PermissionRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            snippet_id,
            user_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn allows_write(&self) -> bool {
        matches!(self.role, PermissionRole::Owner | PermissionRole::Write)
    }

    /// `updated_at` is refreshed here, not in the storage layer, so the
    /// side effect stays visible to callers holding the entity.
    pub fn change_role(&mut self, role: PermissionRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted(role: PermissionRole) -> Permission {
        Permission::grant(SnippetId::new("snippet1"), UserId::new("user1"), role)
    }

    #[test]
    fn grant_sets_both_timestamps_to_the_same_instant() {
        let permission = granted(PermissionRole::Owner);
        assert_eq!(permission.created_at, permission.updated_at);
    }

    #[test]
    fn owner_and_write_allow_writing_read_does_not() {
        assert!(granted(PermissionRole::Owner).allows_write());
        assert!(granted(PermissionRole::Write).allows_write());
        assert!(!granted(PermissionRole::Read).allows_write());
    }

    #[test]
    fn change_role_refreshes_updated_at_only() {
        let mut permission = granted(PermissionRole::Read);
        let id = permission.id;
        let created_at = permission.created_at;
        std::thread::sleep(std::time::Duration::from_millis(2));

        permission.change_role(PermissionRole::Write);

        assert_eq!(permission.role, PermissionRole::Write);
        assert_eq!(permission.id, id);
        assert_eq!(permission.created_at, created_at);
        assert!(permission.updated_at > created_at);
    }
}
