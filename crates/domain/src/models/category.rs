//! Category domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_hex_color;

/// A feedback category. Deactivation, not deletion, is the default path
/// for hiding a category from new submissions while preserving joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    /// Stable lowercase slug, unique.
    pub name: String,
    /// Display label.
    pub label: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    #[serde(default = "default_category_color")]
    pub color: String,

    #[serde(default = "default_category_icon")]
    pub icon: String,
}

fn default_category_color() -> String {
    "#6b7280".to_string()
}

fn default_category_icon() -> String {
    "folder".to_string()
}

/// Request payload for updating a category (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,

    pub icon: Option<String>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{"name": "Workplace Safety", "label": "Workplace Safety"}"#;
        let request: CreateCategoryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.color, "#6b7280");
        assert_eq!(request.icon, "folder");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_color() {
        let json = r#"{"name": "x", "label": "X", "color": "green"}"#;
        let request: CreateCategoryRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let json = r#"{"isActive": false}"#;
        let request: UpdateCategoryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.is_active, Some(false));
        assert!(request.label.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_category_serializes_camel_case() {
        let category = Category {
            id: Uuid::new_v4(),
            name: "benefits".into(),
            label: "Benefits".into(),
            description: None,
            color: "#6b7280".into(),
            icon: "folder".into(),
            is_active: true,
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"isActive\":true"));
        assert!(json.contains("\"sortOrder\":0"));
    }
}
