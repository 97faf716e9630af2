use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use shared::protocol::PermissionRole;
use uuid::Uuid;

use crate::application::ports::{PermissionRepository, StorageError};
use crate::domain::entities::Permission;
use crate::domain::value_objects::{SnippetId, UserId};
use crate::infrastructure::driven::persistence::db_types::{CountRow, DbPermission};

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

pub fn create_pool(database_path: &str) -> anyhow::Result<SqlitePool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_path);
    Ok(Pool::builder().build(manager)?)
}

/// Bootstraps the schema. The composite UNIQUE constraint is the
/// authoritative guard for the one-permission-per-pair invariant; the two
/// indexes cover the snippet and user scans.
pub fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    conn.batch_execute(
        "CREATE TABLE IF NOT EXISTS permissions (
            id TEXT PRIMARY KEY,
            snippet_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            role TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (snippet_id, user_id)
        );
        CREATE INDEX IF NOT EXISTS idx_permissions_snippet_id ON permissions (snippet_id);
        CREATE INDEX IF NOT EXISTS idx_permissions_user_id ON permissions (user_id);",
    )?;
    Ok(())
}

pub struct SqlitePermissionRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePermissionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

fn db_to_permission(row: DbPermission) -> Result<Permission, StorageError> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|e| StorageError::Backend(format!("Invalid id: {e}")))?;
    let role = PermissionRole::from_str(&row.role).map_err(StorageError::Backend)?;
    let created_at = row
        .created_at
        .parse::<DateTime<Utc>>()
        .map_err(|e| StorageError::Backend(format!("Invalid created_at: {e}")))?;
    let updated_at = row
        .updated_at
        .parse::<DateTime<Utc>>()
        .map_err(|e| StorageError::Backend(format!("Invalid updated_at: {e}")))?;

    Ok(Permission {
        id,
        snippet_id: SnippetId::new(row.snippet_id),
        user_id: UserId::new(row.user_id),
        role,
        created_at,
        updated_at,
    })
}

fn backend(e: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(format!("Database error: {e}"))
}

#[async_trait]
impl PermissionRepository for SqlitePermissionRepository {
    async fn insert(&self, permission: &Permission) -> Result<(), StorageError> {
        let id = permission.id.to_string();
        let snippet_id = permission.snippet_id.as_str().to_string();
        let user_id = permission.user_id.as_str().to_string();
        let role = permission.role.as_str().to_string();
        let created_at = permission.created_at.to_rfc3339();
        let updated_at = permission.updated_at.to_rfc3339();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            diesel::sql_query(
                "INSERT INTO permissions (id, snippet_id, user_id, role, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind::<diesel::sql_types::Text, _>(&id)
            .bind::<diesel::sql_types::Text, _>(&snippet_id)
            .bind::<diesel::sql_types::Text, _>(&user_id)
            .bind::<diesel::sql_types::Text, _>(&role)
            .bind::<diesel::sql_types::Text, _>(&created_at)
            .bind::<diesel::sql_types::Text, _>(&updated_at)
            .execute(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    StorageError::DuplicateKey {
                        snippet_id: snippet_id.clone(),
                        user_id: user_id.clone(),
                    }
                }
                other => backend(other),
            })?;
            Ok(())
        })
        .await
        .map_err(backend)?
    }

    async fn find_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<Option<Permission>, StorageError> {
        let snippet_id = snippet_id.as_str().to_string();
        let user_id = user_id.as_str().to_string();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<Option<Permission>, StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            let rows: Vec<DbPermission> = diesel::sql_query(
                "SELECT id, snippet_id, user_id, role, created_at, updated_at \
                 FROM permissions WHERE snippet_id = ?1 AND user_id = ?2",
            )
            .bind::<diesel::sql_types::Text, _>(&snippet_id)
            .bind::<diesel::sql_types::Text, _>(&user_id)
            .load(&mut conn)
            .map_err(backend)?;

            rows.into_iter().next().map(db_to_permission).transpose()
        })
        .await
        .map_err(backend)?
    }

    async fn exists_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<bool, StorageError> {
        let snippet_id = snippet_id.as_str().to_string();
        let user_id = user_id.as_str().to_string();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<bool, StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            let rows: Vec<CountRow> = diesel::sql_query(
                "SELECT COUNT(*) AS count FROM permissions \
                 WHERE snippet_id = ?1 AND user_id = ?2",
            )
            .bind::<diesel::sql_types::Text, _>(&snippet_id)
            .bind::<diesel::sql_types::Text, _>(&user_id)
            .load(&mut conn)
            .map_err(backend)?;

            Ok(rows.first().map(|row| row.count > 0).unwrap_or(false))
        })
        .await
        .map_err(backend)?
    }

    async fn find_by_pair_with_role_in(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
        roles: &[PermissionRole],
    ) -> Result<Option<Permission>, StorageError> {
        let snippet_id = snippet_id.as_str().to_string();
        let user_id = user_id.as_str().to_string();
        // Role names come from the enum, never from user input, so they can
        // be spliced as literals; the pair still goes through binds.
        let role_list = roles
            .iter()
            .map(|role| format!("'{}'", role.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<Option<Permission>, StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            let rows: Vec<DbPermission> = diesel::sql_query(format!(
                "SELECT id, snippet_id, user_id, role, created_at, updated_at \
                 FROM permissions WHERE snippet_id = ?1 AND user_id = ?2 \
                 AND role IN ({role_list})"
            ))
            .bind::<diesel::sql_types::Text, _>(&snippet_id)
            .bind::<diesel::sql_types::Text, _>(&user_id)
            .load(&mut conn)
            .map_err(backend)?;

            rows.into_iter().next().map(db_to_permission).transpose()
        })
        .await
        .map_err(backend)?
    }

    async fn find_by_snippet(
        &self,
        snippet_id: &SnippetId,
    ) -> Result<Vec<Permission>, StorageError> {
        let snippet_id = snippet_id.as_str().to_string();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<Vec<Permission>, StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            let rows: Vec<DbPermission> = diesel::sql_query(
                "SELECT id, snippet_id, user_id, role, created_at, updated_at \
                 FROM permissions WHERE snippet_id = ?1",
            )
            .bind::<diesel::sql_types::Text, _>(&snippet_id)
            .load(&mut conn)
            .map_err(backend)?;

            rows.into_iter().map(db_to_permission).collect()
        })
        .await
        .map_err(backend)?
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Permission>, StorageError> {
        let user_id = user_id.as_str().to_string();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<Vec<Permission>, StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            let rows: Vec<DbPermission> = diesel::sql_query(
                "SELECT id, snippet_id, user_id, role, created_at, updated_at \
                 FROM permissions WHERE user_id = ?1",
            )
            .bind::<diesel::sql_types::Text, _>(&user_id)
            .load(&mut conn)
            .map_err(backend)?;

            rows.into_iter().map(db_to_permission).collect()
        })
        .await
        .map_err(backend)?
    }

    async fn update(&self, permission: &Permission) -> Result<(), StorageError> {
        let snippet_id = permission.snippet_id.as_str().to_string();
        let user_id = permission.user_id.as_str().to_string();
        let role = permission.role.as_str().to_string();
        let updated_at = permission.updated_at.to_rfc3339();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            diesel::sql_query(
                "UPDATE permissions SET role = ?1, updated_at = ?2 \
                 WHERE snippet_id = ?3 AND user_id = ?4",
            )
            .bind::<diesel::sql_types::Text, _>(&role)
            .bind::<diesel::sql_types::Text, _>(&updated_at)
            .bind::<diesel::sql_types::Text, _>(&snippet_id)
            .bind::<diesel::sql_types::Text, _>(&user_id)
            .execute(&mut conn)
            .map_err(backend)?;
            Ok(())
        })
        .await
        .map_err(backend)?
    }

    async fn delete_by_pair(
        &self,
        snippet_id: &SnippetId,
        user_id: &UserId,
    ) -> Result<(), StorageError> {
        let snippet_id = snippet_id.as_str().to_string();
        let user_id = user_id.as_str().to_string();
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            let mut conn = pool.get().map_err(backend)?;
            diesel::sql_query("DELETE FROM permissions WHERE snippet_id = ?1 AND user_id = ?2")
                .bind::<diesel::sql_types::Text, _>(&snippet_id)
                .bind::<diesel::sql_types::Text, _>(&user_id)
                .execute(&mut conn)
                .map_err(backend)?;
            Ok(())
        })
        .await
        .map_err(backend)?
    }
}
