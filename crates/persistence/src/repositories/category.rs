//! Category repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CategoryEntity;
use crate::metrics::QueryTimer;

/// Repository for category-related database operations.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a category. The sort order lands after the current maximum.
    pub async fn create(
        &self,
        name: &str,
        label: &str,
        description: Option<&str>,
        color: &str,
        icon: &str,
    ) -> Result<CategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_category");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            INSERT INTO categories (name, label, description, color, icon, sort_order)
            VALUES ($1, $2, $3, $4, $5,
                    COALESCE((SELECT MAX(sort_order) + 1 FROM categories), 0))
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(label)
        .bind(description)
        .bind(color)
        .bind(icon)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All categories ordered for display.
    pub async fn find_all(&self) -> Result<Vec<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_categories");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Only categories accepting new submissions.
    pub async fn find_active(&self) -> Result<Vec<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_categories");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories WHERE is_active = TRUE ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a category by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category_by_id");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a category by its slug.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category_by_name");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            SELECT * FROM categories WHERE name = $1
            "#,
        )
        .bind(name)
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
        label: Option<&str>,
        description: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_category");
        let result = sqlx::query_as::<_, CategoryEntity>(
            r#"
            UPDATE categories SET
                label = COALESCE($2, label),
                description = COALESCE($3, description),
                color = COALESCE($4, color),
                icon = COALESCE($5, icon),
                is_active = COALESCE($6, is_active),
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(label)
        .bind(description)
        .bind(color)
        .bind(icon)
        .bind(is_active)
        .bind(sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a category. Historical feedback keeps a null category via
    /// the FK's ON DELETE SET NULL; deactivation is the preferred path.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_category");
        let result = sqlx::query(
            r#"
            DELETE FROM categories WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
