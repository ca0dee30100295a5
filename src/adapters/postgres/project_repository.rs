//! PostgreSQL implementation of ProjectRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ProjectId, UserId};
use crate::domain::marketplace::{Project, ProjectStatus};
use crate::ports::ProjectRepository;

use super::rows::{column, invalid_column, query_error};

#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(
            "SELECT id, client_id, title, status, is_deleted FROM projects WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to fetch project", e))?;

        row.as_ref().map(row_to_project).transpose()
    }
}

fn row_to_project(row: &PgRow) -> Result<Project, DomainError> {
    let status: String = column(row, "status")?;
    let status = ProjectStatus::parse(&status).ok_or_else(|| invalid_column("status", &status))?;

    Ok(Project {
        id: ProjectId::new(column::<String>(row, "id")?)?,
        client_id: UserId::new(column::<String>(row, "client_id")?)?,
        title: column(row, "title")?,
        status,
        is_deleted: column(row, "is_deleted")?,
    })
}
