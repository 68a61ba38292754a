//! Feedback repository for database operations.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    FeedbackEntity, FeedbackStatusDb, FeedbackTypeDb, FeedbackWithCategoryEntity,
    ModerationStatusDb, SentimentDb, UrgencyDb,
};
use crate::metrics::QueryTimer;

/// Insert payload for a new feedback row. The AI columns are filled when
/// the analyzer produced a suggestion, null otherwise.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub access_code_hash: String,
    pub category_id: Option<Uuid>,
    pub feedback_type: FeedbackTypeDb,
    pub urgency: UrgencyDb,
    pub subject: String,
    pub description: String,
    pub impact: Option<String>,
    pub suggested_solution: Option<String>,
    pub allow_follow_up: bool,
    pub moderation_status: ModerationStatusDb,
    pub moderation_flags: Vec<String>,
    pub moderation_score: i32,
    pub keywords: Vec<String>,
    pub ai_category: Option<String>,
    pub ai_sentiment: Option<SentimentDb>,
    pub ai_priority: Option<UrgencyDb>,
    pub ai_summary: Option<String>,
    pub ai_keywords: Option<Vec<String>>,
    pub ai_category_suggestion: Option<String>,
    pub ai_urgency_suggestion: Option<UrgencyDb>,
    pub ai_action_items: Option<Vec<String>>,
}

/// One typed question answer to persist with a submission.
#[derive(Debug, Clone)]
pub struct NewQuestionResponse {
    pub question_id: Uuid,
    pub response_value: Option<String>,
    pub response_number: Option<i32>,
    pub response_option: Option<String>,
}

/// Optional filters for feedback listing.
#[derive(Debug, Clone, Default)]
pub struct FeedbackListFilter {
    pub status: Option<FeedbackStatusDb>,
    pub moderation_status: Option<ModerationStatusDb>,
    pub urgency: Option<UrgencyDb>,
    /// Category slug.
    pub category: Option<String>,
}

/// Partial update for a feedback row.
#[derive(Debug, Clone, Default)]
pub struct FeedbackPatch {
    pub status: Option<FeedbackStatusDb>,
    pub urgency: Option<UrgencyDb>,
    pub category_id: Option<Uuid>,
}

/// Repository for feedback-related database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Creates a new FeedbackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a feedback row together with its tag links and question
    /// responses, in a single transaction. A failure anywhere rolls the
    /// whole submission back rather than leaving a partial write.
    pub async fn create(
        &self,
        new: NewFeedback,
        tag_ids: &[Uuid],
        responses: &[NewQuestionResponse],
    ) -> Result<FeedbackEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_feedback");
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            INSERT INTO feedback (
                access_code_hash, category_id, feedback_type, urgency, subject,
                description, impact, suggested_solution, allow_follow_up,
                moderation_status, moderation_flags, moderation_score, keywords,
                ai_category, ai_sentiment, ai_priority, ai_summary, ai_keywords,
                ai_category_suggestion, ai_urgency_suggestion, ai_action_items
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21
            )
            RETURNING *
            "#,
        )
        .bind(&new.access_code_hash)
        .bind(new.category_id)
        .bind(new.feedback_type)
        .bind(new.urgency)
        .bind(&new.subject)
        .bind(&new.description)
        .bind(&new.impact)
        .bind(&new.suggested_solution)
        .bind(new.allow_follow_up)
        .bind(new.moderation_status)
        .bind(&new.moderation_flags)
        .bind(new.moderation_score)
        .bind(&new.keywords)
        .bind(&new.ai_category)
        .bind(new.ai_sentiment)
        .bind(new.ai_priority)
        .bind(&new.ai_summary)
        .bind(&new.ai_keywords)
        .bind(&new.ai_category_suggestion)
        .bind(new.ai_urgency_suggestion)
        .bind(&new.ai_action_items)
        .fetch_one(&mut *tx)
        .await?;

        for tag_id in tag_ids {
            sqlx::query(
                r#"
                INSERT INTO feedback_tags (feedback_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT (feedback_id, tag_id) DO NOTHING
                "#,
            )
            .bind(entity.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        for response in responses {
            sqlx::query(
                r#"
                INSERT INTO feedback_responses
                    (feedback_id, question_id, response_value, response_number, response_option)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (feedback_id, question_id) DO NOTHING
                "#,
            )
            .bind(entity.id)
            .bind(response.question_id)
            .bind(&response.response_value)
            .bind(response.response_number)
            .bind(&response.response_option)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(entity)
    }

    /// Find feedback by id, joined with its category.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<FeedbackWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feedback_by_id");
        let result = sqlx::query_as::<_, FeedbackWithCategoryEntity>(
            r#"
            SELECT f.*, c.name AS category_name, c.label AS category_label
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            WHERE f.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find feedback by access code digest.
    ///
    /// An unknown digest is an ordinary `None`, indistinguishable from a
    /// wrong code, so the lookup leaks nothing about stored records.
    pub async fn find_by_access_code_hash(
        &self,
        access_code_hash: &str,
    ) -> Result<Option<FeedbackWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feedback_by_access_code_hash");
        let result = sqlx::query_as::<_, FeedbackWithCategoryEntity>(
            r#"
            SELECT f.*, c.name AS category_name, c.label AS category_label
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            WHERE f.access_code_hash = $1
            "#,
        )
        .bind(access_code_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List feedback matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &FeedbackListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedbackWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feedback");
        let result = sqlx::query_as::<_, FeedbackWithCategoryEntity>(
            r#"
            SELECT f.*, c.name AS category_name, c.label AS category_label
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            WHERE ($1::feedback_status IS NULL OR f.status = $1)
              AND ($2::moderation_status IS NULL OR f.moderation_status = $2)
              AND ($3::urgency IS NULL OR f.urgency = $3)
              AND ($4::text IS NULL OR c.name = $4)
            ORDER BY f.created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.status)
        .bind(filter.moderation_status)
        .bind(filter.urgency)
        .bind(&filter.category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count feedback matching the filter.
    pub async fn count(&self, filter: &FeedbackListFilter) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_feedback");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            WHERE ($1::feedback_status IS NULL OR f.status = $1)
              AND ($2::moderation_status IS NULL OR f.moderation_status = $2)
              AND ($3::urgency IS NULL OR f.urgency = $3)
              AND ($4::text IS NULL OR c.name = $4)
            "#,
        )
        .bind(filter.status)
        .bind(filter.moderation_status)
        .bind(filter.urgency)
        .bind(&filter.category)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// List the moderation queue: flagged and still-pending items, newest
    /// first.
    pub async fn list_moderation_queue(
        &self,
    ) -> Result<Vec<FeedbackWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_moderation_queue");
        let result = sqlx::query_as::<_, FeedbackWithCategoryEntity>(
            r#"
            SELECT f.*, c.name AS category_name, c.label AS category_label
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            WHERE f.moderation_status IN ('flagged', 'pending')
            ORDER BY f.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partial update. Transitioning into `resolved` stamps `resolved_at`
    /// exactly once; re-resolving an already-resolved item leaves the
    /// original timestamp in place.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &FeedbackPatch,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_feedback");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            UPDATE feedback SET
                status = COALESCE($2, status),
                urgency = COALESCE($3, urgency),
                category_id = COALESCE($4, category_id),
                resolved_at = CASE
                    WHEN COALESCE($2, status) = 'resolved'::feedback_status
                         AND status <> 'resolved'::feedback_status
                    THEN NOW()
                    ELSE resolved_at
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.status)
        .bind(patch.urgency)
        .bind(patch.category_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Append one timestamped line to the append-only admin notes.
    pub async fn append_admin_note(
        &self,
        id: Uuid,
        note: &str,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("append_admin_note");
        let line = format!("[{}] {}", Utc::now().to_rfc3339(), note.trim());
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            UPDATE feedback SET
                admin_notes = array_append(admin_notes, $2),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(line)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the moderation status of one item.
    pub async fn update_moderation_status(
        &self,
        id: Uuid,
        status: ModerationStatusDb,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_moderation_status");
        let result = sqlx::query_as::<_, FeedbackEntity>(
            r#"
            UPDATE feedback SET
                moderation_status = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Tag names linked to one feedback item.
    pub async fn tag_names(&self, feedback_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("feedback_tag_names");
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT t.name
            FROM feedback_tags ft
            JOIN tags t ON t.id = ft.tag_id
            WHERE ft.feedback_id = $1
            ORDER BY t.sort_order, t.name
            "#,
        )
        .bind(feedback_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default_is_unfiltered() {
        let filter = FeedbackListFilter::default();
        assert!(filter.status.is_none());
        assert!(filter.moderation_status.is_none());
        assert!(filter.urgency.is_none());
        assert!(filter.category.is_none());
    }

    #[test]
    fn test_patch_default_is_noop() {
        let patch = FeedbackPatch::default();
        assert!(patch.status.is_none());
        assert!(patch.urgency.is_none());
        assert!(patch.category_id.is_none());
    }
}
