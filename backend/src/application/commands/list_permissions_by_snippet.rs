use crate::application::error::PermissionError;
use crate::application::ports::PermissionRepository;
use crate::domain::entities::Permission;
use crate::domain::value_objects::SnippetId;

pub async fn execute<R: PermissionRepository + ?Sized>(
    repo: &R,
    snippet_id: &SnippetId,
) -> Result<Vec<Permission>, PermissionError> {
    let permissions = repo.find_by_snippet(snippet_id).await?;
    tracing::debug!("Fetched {} permissions for snippet {snippet_id}", permissions.len());
    Ok(permissions)
}
