//! Project repository port (read side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::marketplace::Project;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by id, including soft-deleted projects.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;
}
