//! Tag domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_hex_color;

/// A label attachable to feedback items, many-to-many.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a tag.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_hex_color"))]
    #[serde(default = "default_tag_color")]
    pub color: String,
}

fn default_tag_color() -> String {
    "#3b82f6".to_string()
}

/// Request payload for updating a tag (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_default_color() {
        let json = r#"{"name": "safety"}"#;
        let request: CreateTagRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.color, "#3b82f6");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_name() {
        let json = r#"{"name": ""}"#;
        let request: CreateTagRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let json = r##"{"color": "#ef4444"}"##;
        let request: UpdateTagRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.color.as_deref(), Some("#ef4444"));
        assert!(request.name.is_none());
        assert!(request.validate().is_ok());
    }
}
