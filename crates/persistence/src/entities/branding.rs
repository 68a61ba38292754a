//! Branding settings entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::BrandingSettings;

/// Database row mapping for the branding_settings table (singleton row).
#[derive(Debug, Clone, FromRow)]
pub struct BrandingEntity {
    pub id: Uuid,
    pub site_name: String,
    pub site_description: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub trust_badge_1_title: String,
    pub trust_badge_1_description: Option<String>,
    pub trust_badge_2_title: String,
    pub trust_badge_2_description: Option<String>,
    pub trust_badge_3_title: String,
    pub trust_badge_3_description: Option<String>,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<BrandingEntity> for BrandingSettings {
    fn from(entity: BrandingEntity) -> Self {
        Self {
            id: entity.id,
            site_name: entity.site_name,
            site_description: entity.site_description,
            logo_url: entity.logo_url,
            primary_color: entity.primary_color,
            secondary_color: entity.secondary_color,
            accent_color: entity.accent_color,
            trust_badge_1_title: entity.trust_badge_1_title,
            trust_badge_1_description: entity.trust_badge_1_description,
            trust_badge_2_title: entity.trust_badge_2_title,
            trust_badge_2_description: entity.trust_badge_2_description,
            trust_badge_3_title: entity.trust_badge_3_title,
            trust_badge_3_description: entity.trust_badge_3_description,
            custom_css: entity.custom_css,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_preserves_defaults() {
        let entity = BrandingEntity {
            id: Uuid::new_v4(),
            site_name: "Anonymous Feedback Portal".into(),
            site_description: None,
            logo_url: None,
            primary_color: "#10b981".into(),
            secondary_color: "#6366f1".into(),
            accent_color: "#f59e0b".into(),
            trust_badge_1_title: "End-to-End Encryption".into(),
            trust_badge_1_description: None,
            trust_badge_2_title: "No IP Tracking".into(),
            trust_badge_2_description: None,
            trust_badge_3_title: "Anonymous Follow-ups".into(),
            trust_badge_3_description: None,
            custom_css: None,
            updated_at: Utc::now(),
        };
        let settings: BrandingSettings = entity.clone().into();
        assert_eq!(settings.site_name, "Anonymous Feedback Portal");
        assert_eq!(settings.primary_color, "#10b981");
    }
}
