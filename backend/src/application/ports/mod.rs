// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod permission_repository;

pub use permission_repository::{PermissionRepository, StorageError};
