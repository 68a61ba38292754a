//! Branding settings model (singleton row).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_hex_color;

/// Portal branding configuration. One logical row; reads fall back to
/// defaults until the first upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingSettings {
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

/// Request payload for updating branding (partial upsert).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandingRequest {
    #[validate(length(min = 1, max = 100, message = "Site name must be 1-100 characters"))]
    pub site_name: Option<String>,

    pub site_description: Option<String>,

    pub logo_url: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub accent_color: Option<String>,

    pub trust_badge_1_title: Option<String>,
    pub trust_badge_1_description: Option<String>,
    pub trust_badge_2_title: Option<String>,
    pub trust_badge_2_description: Option<String>,
    pub trust_badge_3_title: Option<String>,
    pub trust_badge_3_description: Option<String>,

    pub custom_css: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_partial() {
        let json = r##"{"siteName": "Acme Feedback", "primaryColor": "#10b981"}"##;
        let request: UpdateBrandingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.site_name.as_deref(), Some("Acme Feedback"));
        assert_eq!(request.primary_color.as_deref(), Some("#10b981"));
        assert!(request.custom_css.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_rejects_bad_color() {
        let json = r#"{"primaryColor": "green"}"#;
        let request: UpdateBrandingRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
