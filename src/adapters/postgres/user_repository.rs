//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::domain::marketplace::User;
use crate::domain::verification::{VerificationState, VerificationStatus};
use crate::ports::UserRepository;

use super::rows::{column, invalid_column, query_error};

const USER_COLUMNS: &str = "id, role, name, is_deleted, verification_session_id, \
     verification_status, verification_reason";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_verification_session(
        &self,
        session_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "SELECT {} FROM users WHERE verification_session_id = $1 LIMIT 1",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch user by verification session", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn update_verification(
        &self,
        id: &UserId,
        state: &VerificationState,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                verification_session_id = $2,
                verification_status = $3,
                verification_reason = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(state.session_id.as_deref())
        .bind(state.status.as_ref().map(VerificationStatus::as_str))
        .bind(state.reason.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update user verification", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("User not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let role: String = column(row, "role")?;
    let role = Role::parse(&role).ok_or_else(|| invalid_column("role", &role))?;
    let status: Option<String> = column(row, "verification_status")?;

    Ok(User {
        id: UserId::new(column::<String>(row, "id")?)?,
        role,
        name: column(row, "name")?,
        is_deleted: column(row, "is_deleted")?,
        verification: VerificationState {
            session_id: column(row, "verification_session_id")?,
            status: status.as_deref().map(VerificationStatus::parse),
            reason: column(row, "verification_reason")?,
        },
    })
}
