//! PostgreSQL implementation of ProposalRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, ProposalId, UserId};
use crate::domain::marketplace::{Proposal, ProposalStatus};
use crate::ports::ProposalRepository;

use super::rows::{column, invalid_column, query_error, timestamp_column};

const PROPOSAL_COLUMNS: &str =
    "id, project_id, client_id, freelancer_id, message, status, is_deleted, created_at";

#[derive(Clone)]
pub struct PostgresProposalRepository {
    pool: PgPool,
}

impl PostgresProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalRepository for PostgresProposalRepository {
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        let sql = format!("SELECT {} FROM proposals WHERE id = $1", PROPOSAL_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch proposal", e))?;

        row.as_ref().map(row_to_proposal).transpose()
    }

    async fn update_status(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE proposals SET status = $2 WHERE id = $1")
            .bind(proposal.id.as_str())
            .bind(proposal.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update proposal", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Proposal not found: {}", proposal.id),
            ));
        }

        Ok(())
    }

    async fn list_accepted_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<Proposal>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM proposals
            WHERE status = 'accepted'
              AND is_deleted = false
              AND (client_id = $1 OR freelancer_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            PROPOSAL_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.as_str())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list accepted proposals", e))?;

        rows.iter().map(row_to_proposal).collect()
    }
}

fn row_to_proposal(row: &PgRow) -> Result<Proposal, DomainError> {
    let status: String = column(row, "status")?;
    let status =
        ProposalStatus::parse(&status).ok_or_else(|| invalid_column("status", &status))?;

    Ok(Proposal {
        id: ProposalId::new(column::<String>(row, "id")?)?,
        project_id: ProjectId::new(column::<String>(row, "project_id")?)?,
        client_id: UserId::new(column::<String>(row, "client_id")?)?,
        freelancer_id: UserId::new(column::<String>(row, "freelancer_id")?)?,
        message: column(row, "message")?,
        status,
        is_deleted: column(row, "is_deleted")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}
