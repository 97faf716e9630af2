mod db_types;
pub mod memory_permission_repository;
pub mod permission_repository;
pub mod schema;

pub use memory_permission_repository::InMemoryPermissionRepository;
pub use permission_repository::{
    create_pool, ensure_schema, SqlitePermissionRepository, SqlitePool,
};
