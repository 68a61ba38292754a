//! Tag repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TagEntity;
use crate::metrics::QueryTimer;

/// Repository for tag-related database operations.
#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Creates a new TagRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a tag. The sort order lands after the current maximum.
    pub async fn create(&self, name: &str, color: &str) -> Result<TagEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_tag");
        let result = sqlx::query_as::<_, TagEntity>(
            r#"
            INSERT INTO tags (name, color, sort_order)
            VALUES ($1, $2, COALESCE((SELECT MAX(sort_order) + 1 FROM tags), 0))
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(color)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All tags ordered for display.
    pub async fn find_all(&self) -> Result<Vec<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_tags");
        let result = sqlx::query_as::<_, TagEntity>(
            r#"
            SELECT * FROM tags ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Only tags offered on new submissions.
    pub async fn find_active(&self) -> Result<Vec<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_tags");
        let result = sqlx::query_as::<_, TagEntity>(
            r#"
            SELECT * FROM tags WHERE is_active = TRUE ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a tag by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_tag_by_id");
        let result = sqlx::query_as::<_, TagEntity>(
            r#"
            SELECT * FROM tags WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Resolve active tag names to ids. Unknown names are skipped.
    pub async fn find_ids_by_names(&self, names: &[String]) -> Result<Vec<Uuid>, sqlx::Error> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_tag_ids_by_names");
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM tags WHERE is_active = TRUE AND name = ANY($1)
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Partial update; only provided fields change.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> Result<Option<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_tag");
        let result = sqlx::query_as::<_, TagEntity>(
            r#"
            UPDATE tags SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                is_active = COALESCE($4, is_active),
                sort_order = COALESCE($5, sort_order)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .bind(is_active)
        .bind(sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a tag and its feedback links (cascade).
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_tag");
        let result = sqlx::query(
            r#"
            DELETE FROM tags WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
