//! Question repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{QuestionEntity, QuestionTypeDb, ResponseWithQuestionEntity};
use crate::metrics::QueryTimer;

/// Repository for question-related database operations.
#[derive(Clone)]
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    /// Creates a new QuestionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a question. The sort order lands after the current maximum.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        question_type: QuestionTypeDb,
        question_text: &str,
        description: Option<&str>,
        options: Option<&serde_json::Value>,
        is_required: bool,
        min_value: Option<i32>,
        max_value: Option<i32>,
    ) -> Result<QuestionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_question");
        let result = sqlx::query_as::<_, QuestionEntity>(
            r#"
            INSERT INTO questions
                (question_type, question_text, description, options, is_required,
                 min_value, max_value, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    COALESCE((SELECT MAX(sort_order) + 1 FROM questions), 0))
            RETURNING *
            "#,
        )
        .bind(question_type)
        .bind(question_text)
        .bind(description)
        .bind(options)
        .bind(is_required)
        .bind(min_value)
        .bind(max_value)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All questions ordered for display.
    pub async fn find_all(&self) -> Result<Vec<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_questions");
        let result = sqlx::query_as::<_, QuestionEntity>(
            r#"
            SELECT * FROM questions ORDER BY sort_order, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Only questions shown on the submission wizard.
    pub async fn find_active(&self) -> Result<Vec<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_questions");
        let result = sqlx::query_as::<_, QuestionEntity>(
            r#"
            SELECT * FROM questions WHERE is_active = TRUE ORDER BY sort_order, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a question by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_question_by_id");
        let result = sqlx::query_as::<_, QuestionEntity>(
            r#"
            SELECT * FROM questions WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update; only provided fields change.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        question_text: Option<&str>,
        description: Option<&str>,
        options: Option<&serde_json::Value>,
        is_required: Option<bool>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
        min_value: Option<i32>,
        max_value: Option<i32>,
    ) -> Result<Option<QuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_question");
        let result = sqlx::query_as::<_, QuestionEntity>(
            r#"
            UPDATE questions SET
                question_text = COALESCE($2, question_text),
                description = COALESCE($3, description),
                options = COALESCE($4, options),
                is_required = COALESCE($5, is_required),
                is_active = COALESCE($6, is_active),
                sort_order = COALESCE($7, sort_order),
                min_value = COALESCE($8, min_value),
                max_value = COALESCE($9, max_value),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(question_text)
        .bind(description)
        .bind(options)
        .bind(is_required)
        .bind(is_active)
        .bind(sort_order)
        .bind(min_value)
        .bind(max_value)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a question and its responses (cascade).
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_question");
        let result = sqlx::query(
            r#"
            DELETE FROM questions WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Responses recorded for one feedback item, with question text.
    pub async fn responses_for_feedback(
        &self,
        feedback_id: Uuid,
    ) -> Result<Vec<ResponseWithQuestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("responses_for_feedback");
        let result = sqlx::query_as::<_, ResponseWithQuestionEntity>(
            r#"
            SELECT r.question_id, q.question_text,
                   r.response_value, r.response_number, r.response_option
            FROM feedback_responses r
            JOIN questions q ON q.id = r.question_id
            WHERE r.feedback_id = $1
            ORDER BY q.sort_order, q.created_at
            "#,
        )
        .bind(feedback_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
