//! PostgreSQL implementation of ConversationRepository.
//!
//! The partial unique index `conversations_live_proposal_idx` allows at most
//! one live conversation per proposal; a second insert surfaces as a
//! conflict error.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{ConversationId, DomainError, ProjectId, ProposalId};
use crate::domain::marketplace::{ChannelId, Conversation, NewConversation};
use crate::ports::ConversationRepository;

use super::rows::{column, query_error, timestamp_column};

#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn find_live_by_proposal(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<Conversation>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, project_id, proposal_id, channel_id, is_deleted, created_at
            FROM conversations
            WHERE proposal_id = $1 AND is_deleted = false
            LIMIT 1
            "#,
        )
        .bind(proposal_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to fetch conversation", e))?;

        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn insert(&self, conversation: NewConversation) -> Result<Conversation, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO conversations (project_id, proposal_id, channel_id)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, proposal_id, channel_id, is_deleted, created_at
            "#,
        )
        .bind(conversation.project_id.as_str())
        .bind(conversation.proposal_id.as_str())
        .bind(conversation.channel_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to insert conversation", e))?;

        row_to_conversation(&row)
    }
}

fn row_to_conversation(row: &PgRow) -> Result<Conversation, DomainError> {
    Ok(Conversation {
        id: ConversationId::new(column::<String>(row, "id")?)?,
        project_id: ProjectId::new(column::<String>(row, "project_id")?)?,
        proposal_id: ProposalId::new(column::<String>(row, "proposal_id")?)?,
        channel_id: ChannelId::from_stored(column::<String>(row, "channel_id")?),
        is_deleted: column(row, "is_deleted")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}
