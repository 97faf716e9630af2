// Infrastructure layer - external concerns (database, HTTP)
// Implements interfaces defined in application layer

use std::sync::Arc;

use crate::application::ports::PermissionRepository;

pub mod driven; // Output adapters (repositories)
pub mod driving; // Input adapters (HTTP)

#[derive(Clone)]
pub struct AppState {
    pub permission_repo: Arc<dyn PermissionRepository>,
}
