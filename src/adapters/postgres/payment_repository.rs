//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, ProjectId, UserId};
use crate::domain::payment::{NewPayment, Payment, PaymentStatus};
use crate::ports::PaymentRepository;

use super::rows::{column, invalid_column, query_error, timestamp_column};

const PAYMENT_COLUMNS: &str = "id, client_id, freelancer_id, project_id, amount, currency, \
     status, checkout_session_id, payment_intent_id, is_deleted, created_at";

#[derive(Clone)]
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn create(&self, payment: NewPayment) -> Result<Payment, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO payments (client_id, freelancer_id, project_id, amount, currency, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(payment.client_id.as_str())
            .bind(payment.freelancer_id.as_str())
            .bind(payment.project_id.as_str())
            .bind(payment.amount)
            .bind(&payment.currency)
            .bind(PaymentStatus::Created.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to insert payment", e))?;

        row_to_payment(&row)
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE id = $1 AND is_deleted = false",
            PAYMENT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch payment", e))?;

        row.as_ref().map(row_to_payment).transpose()
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = $2,
                checkout_session_id = $3,
                payment_intent_id = $4,
                is_deleted = $5
            WHERE id = $1
            "#,
        )
        .bind(payment.id.as_str())
        .bind(payment.status.as_str())
        .bind(payment.checkout_session_id.as_deref())
        .bind(payment.payment_intent_id.as_deref())
        .bind(payment.is_deleted)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update payment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Payment not found: {}", payment.id),
            ));
        }

        Ok(())
    }
}

fn row_to_payment(row: &PgRow) -> Result<Payment, DomainError> {
    let status: String = column(row, "status")?;
    let status = PaymentStatus::parse(&status).ok_or_else(|| invalid_column("status", &status))?;

    Ok(Payment {
        id: PaymentId::new(column::<String>(row, "id")?)?,
        client_id: UserId::new(column::<String>(row, "client_id")?)?,
        freelancer_id: UserId::new(column::<String>(row, "freelancer_id")?)?,
        project_id: ProjectId::new(column::<String>(row, "project_id")?)?,
        amount: column(row, "amount")?,
        currency: column(row, "currency")?,
        status,
        checkout_session_id: column(row, "checkout_session_id")?,
        payment_intent_id: column(row, "payment_intent_id")?,
        is_deleted: column(row, "is_deleted")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}
