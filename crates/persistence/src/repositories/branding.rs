//! Branding settings repository (singleton row).

use sqlx::PgPool;

use crate::entities::BrandingEntity;
use crate::metrics::QueryTimer;

/// Partial update for the branding row.
#[derive(Debug, Clone, Default)]
pub struct BrandingPatch {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub trust_badge_1_title: Option<String>,
    pub trust_badge_1_description: Option<String>,
    pub trust_badge_2_title: Option<String>,
    pub trust_badge_2_description: Option<String>,
    pub trust_badge_3_title: Option<String>,
    pub trust_badge_3_description: Option<String>,
    pub custom_css: Option<String>,
}

/// Repository for the branding settings singleton.
#[derive(Clone)]
pub struct BrandingRepository {
    pool: PgPool,
}

impl BrandingRepository {
    /// Creates a new BrandingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The branding row, if one has been created.
    pub async fn get(&self) -> Result<Option<BrandingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_branding");
        let result = sqlx::query_as::<_, BrandingEntity>(
            r#"
            SELECT * FROM branding_settings ORDER BY updated_at DESC LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get-or-create-on-upsert: inserts the default row on first write,
    /// then applies the patch. Only provided fields change.
    pub async fn upsert(&self, patch: &BrandingPatch) -> Result<BrandingEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_branding");

        if self.get().await?.is_none() {
            sqlx::query(
                r#"
                INSERT INTO branding_settings DEFAULT VALUES
                "#,
            )
            .execute(&self.pool)
            .await?;
        }

        let result = sqlx::query_as::<_, BrandingEntity>(
            r#"
            UPDATE branding_settings SET
                site_name = COALESCE($1, site_name),
                site_description = COALESCE($2, site_description),
                logo_url = COALESCE($3, logo_url),
                primary_color = COALESCE($4, primary_color),
                secondary_color = COALESCE($5, secondary_color),
                accent_color = COALESCE($6, accent_color),
                trust_badge_1_title = COALESCE($7, trust_badge_1_title),
                trust_badge_1_description = COALESCE($8, trust_badge_1_description),
                trust_badge_2_title = COALESCE($9, trust_badge_2_title),
                trust_badge_2_description = COALESCE($10, trust_badge_2_description),
                trust_badge_3_title = COALESCE($11, trust_badge_3_title),
                trust_badge_3_description = COALESCE($12, trust_badge_3_description),
                custom_css = COALESCE($13, custom_css),
                updated_at = NOW()
            WHERE id = (SELECT id FROM branding_settings ORDER BY updated_at DESC LIMIT 1)
            RETURNING *
            "#,
        )
        .bind(&patch.site_name)
        .bind(&patch.site_description)
        .bind(&patch.logo_url)
        .bind(&patch.primary_color)
        .bind(&patch.secondary_color)
        .bind(&patch.accent_color)
        .bind(&patch.trust_badge_1_title)
        .bind(&patch.trust_badge_1_description)
        .bind(&patch.trust_badge_2_title)
        .bind(&patch.trust_badge_2_description)
        .bind(&patch.trust_badge_3_title)
        .bind(&patch.trust_badge_3_description)
        .bind(&patch.custom_css)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
