//! Analytics repository.
//!
//! Aggregate queries backing the admin dashboard. All grouping happens in
//! SQL; the Rust side only reshapes rows into DTOs.

use sqlx::PgPool;

use crate::entities::{
    DailyCountEntity, KeywordCountEntity, ModerationCountsEntity, NameCountEntity,
    StatusTotalsEntity,
};
use crate::metrics::QueryTimer;

/// Repository for analytics operations.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Top-level totals: overall, resolved, received, in-progress.
    pub async fn status_totals(&self) -> Result<StatusTotalsEntity, sqlx::Error> {
        let timer = QueryTimer::new("analytics_status_totals");
        let result = sqlx::query_as::<_, StatusTotalsEntity>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE status = 'received') AS pending,
                COUNT(*) FILTER (WHERE status = 'in-progress') AS in_progress
            FROM feedback
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts grouped by workflow status.
    pub async fn count_by_status(&self) -> Result<Vec<NameCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_count_by_status");
        let result = sqlx::query_as::<_, NameCountEntity>(
            r#"
            SELECT status::text AS name, COUNT(*) AS count
            FROM feedback
            GROUP BY status
            ORDER BY count DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts grouped by category label; uncategorized items are pooled.
    pub async fn count_by_category(&self) -> Result<Vec<NameCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_count_by_category");
        let result = sqlx::query_as::<_, NameCountEntity>(
            r#"
            SELECT COALESCE(c.label, 'Uncategorized') AS name, COUNT(*) AS count
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            GROUP BY COALESCE(c.label, 'Uncategorized')
            ORDER BY count DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts grouped by urgency tier.
    pub async fn count_by_urgency(&self) -> Result<Vec<NameCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_count_by_urgency");
        let result = sqlx::query_as::<_, NameCountEntity>(
            r#"
            SELECT urgency::text AS name, COUNT(*) AS count
            FROM feedback
            GROUP BY urgency
            ORDER BY count DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts grouped by feedback type.
    pub async fn count_by_type(&self) -> Result<Vec<NameCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_count_by_type");
        let result = sqlx::query_as::<_, NameCountEntity>(
            r#"
            SELECT feedback_type::text AS name, COUNT(*) AS count
            FROM feedback
            GROUP BY feedback_type
            ORDER BY count DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts grouped by AI sentiment; untagged items are excluded.
    pub async fn count_by_sentiment(&self) -> Result<Vec<NameCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_count_by_sentiment");
        let result = sqlx::query_as::<_, NameCountEntity>(
            r#"
            SELECT ai_sentiment::text AS name, COUNT(*) AS count
            FROM feedback
            WHERE ai_sentiment IS NOT NULL
            GROUP BY ai_sentiment
            ORDER BY count DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Daily submission counts over the trailing 30 days, ascending.
    pub async fn daily_trend(&self) -> Result<Vec<DailyCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_daily_trend");
        let result = sqlx::query_as::<_, DailyCountEntity>(
            r#"
            SELECT created_at::date AS date, COUNT(*) AS count
            FROM feedback
            WHERE created_at >= NOW() - INTERVAL '30 days'
            GROUP BY created_at::date
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Top 20 extracted keywords across all feedback. Ties break
    /// alphabetically so the output is stable.
    pub async fn top_keywords(&self) -> Result<Vec<KeywordCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("analytics_top_keywords");
        let result = sqlx::query_as::<_, KeywordCountEntity>(
            r#"
            SELECT kw AS word, COUNT(*) AS count
            FROM feedback, unnest(keywords) AS kw
            GROUP BY kw
            ORDER BY count DESC, word ASC
            LIMIT 20
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Moderation queue counters.
    pub async fn moderation_counts(&self) -> Result<ModerationCountsEntity, sqlx::Error> {
        let timer = QueryTimer::new("analytics_moderation_counts");
        let result = sqlx::query_as::<_, ModerationCountsEntity>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE moderation_status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE moderation_status = 'flagged') AS flagged,
                COUNT(*) FILTER (WHERE moderation_status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE moderation_status = 'rejected') AS rejected
            FROM feedback
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
