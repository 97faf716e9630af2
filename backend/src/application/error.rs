use thiserror::Error;

use crate::application::ports::StorageError;

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("Permission already exists for snippet {snippet_id} and user {user_id}")]
    Duplicate {
        snippet_id: String,
        user_id: String,
    },

    #[error("Permission not found for snippet {snippet_id} and user {user_id}")]
    NotFound {
        snippet_id: String,
        user_id: String,
    },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<StorageError> for PermissionError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::DuplicateKey {
                snippet_id,
                user_id,
            } => PermissionError::Duplicate {
                snippet_id,
                user_id,
            },
            StorageError::Backend(detail) => PermissionError::Storage(detail),
        }
    }
}
