//! Clarification repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ClarificationEntity;
use crate::metrics::QueryTimer;

/// Repository for clarification-related database operations.
#[derive(Clone)]
pub struct ClarificationRepository {
    pool: PgPool,
}

impl ClarificationRepository {
    /// Creates a new ClarificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach a new clarification question to a feedback item.
    pub async fn create(
        &self,
        feedback_id: Uuid,
        question: &str,
    ) -> Result<ClarificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_clarification");
        let result = sqlx::query_as::<_, ClarificationEntity>(
            r#"
            INSERT INTO clarifications (feedback_id, question)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(feedback_id)
        .bind(question)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All clarifications for one feedback item, oldest first.
    pub async fn find_by_feedback_id(
        &self,
        feedback_id: Uuid,
    ) -> Result<Vec<ClarificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_clarifications_by_feedback");
        let result = sqlx::query_as::<_, ClarificationEntity>(
            r#"
            SELECT * FROM clarifications
            WHERE feedback_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(feedback_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record the submitter's answer.
    ///
    /// The update is fenced three ways in one statement: the clarification
    /// must exist, must belong to the feedback item resolved from the
    /// access code, and must not have been answered yet. Any mismatch
    /// returns `None`, so a caller cannot tell which condition failed.
    pub async fn respond(
        &self,
        clarification_id: Uuid,
        feedback_id: Uuid,
        response: &str,
    ) -> Result<Option<ClarificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("respond_to_clarification");
        let result = sqlx::query_as::<_, ClarificationEntity>(
            r#"
            UPDATE clarifications SET
                response = $3,
                responded_at = NOW()
            WHERE id = $1
              AND feedback_id = $2
              AND responded_at IS NULL
            RETURNING *
            "#,
        )
        .bind(clarification_id)
        .bind(feedback_id)
        .bind(response)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
