//! Configurable form question model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Kind of answer a question collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Rating,
    MultipleChoice,
    Select,
    Text,
    Textarea,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Rating => "rating",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Select => "select",
            QuestionType::Text => "text",
            QuestionType::Textarea => "textarea",
        }
    }

    /// Choice-style questions store the picked option.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::Select)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configurable question shown on the submission wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub question_type: QuestionType,
    pub question_text: String,
    pub description: Option<String>,
    /// Options for choice-type questions.
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    pub is_active: bool,
    pub sort_order: i32,
    /// Rating bounds; only meaningful for `rating`.
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a question.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub question_type: QuestionType,

    #[validate(length(min = 1, max = 500, message = "Question text must be 1-500 characters"))]
    pub question_text: String,

    pub description: Option<String>,

    pub options: Option<Vec<String>>,

    #[serde(default)]
    pub is_required: bool,

    pub min_value: Option<i32>,

    pub max_value: Option<i32>,
}

impl CreateQuestionRequest {
    /// Cross-field rules: choice questions need options, rating bounds
    /// must be ordered.
    pub fn validate_shape(&self) -> Result<(), ValidationError> {
        if self.question_type.is_choice() && self.options.as_ref().map_or(true, |o| o.is_empty()) {
            let mut err = ValidationError::new("options_required");
            err.message = Some("Choice questions require at least one option".into());
            return Err(err);
        }
        if self.question_type == QuestionType::Rating {
            let min = self.min_value.unwrap_or(1);
            let max = self.max_value.unwrap_or(5);
            if min >= max {
                let mut err = ValidationError::new("rating_bounds");
                err.message = Some("Rating minValue must be less than maxValue".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Request payload for updating a question (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 500, message = "Question text must be 1-500 characters"))]
    pub question_text: Option<String>,

    pub description: Option<String>,

    pub options: Option<Vec<String>>,

    pub is_required: Option<bool>,

    pub is_active: Option<bool>,

    pub sort_order: Option<i32>,

    pub min_value: Option<i32>,

    pub max_value: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionType::MultipleChoice).unwrap(),
            "\"multiple_choice\""
        );
        let qt: QuestionType = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(qt, QuestionType::Textarea);
    }

    #[test]
    fn test_choice_detection() {
        assert!(QuestionType::MultipleChoice.is_choice());
        assert!(QuestionType::Select.is_choice());
        assert!(!QuestionType::Rating.is_choice());
        assert!(!QuestionType::Text.is_choice());
    }

    #[test]
    fn test_create_rating_question_valid_bounds() {
        let json = r#"{
            "questionType": "rating",
            "questionText": "How satisfied are you?",
            "minValue": 1,
            "maxValue": 5
        }"#;
        let request: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.validate_shape().is_ok());
    }

    #[test]
    fn test_create_rating_question_inverted_bounds() {
        let json = r#"{
            "questionType": "rating",
            "questionText": "How satisfied are you?",
            "minValue": 5,
            "maxValue": 1
        }"#;
        let request: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate_shape().is_err());
    }

    #[test]
    fn test_create_choice_question_requires_options() {
        let json = r#"{
            "questionType": "multiple_choice",
            "questionText": "Which site?"
        }"#;
        let request: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate_shape().is_err());
    }

    #[test]
    fn test_create_choice_question_with_options() {
        let json = r#"{
            "questionType": "select",
            "questionText": "Which site?",
            "options": ["North", "South"]
        }"#;
        let request: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate_shape().is_ok());
    }

    #[test]
    fn test_text_question_needs_no_options() {
        let json = r#"{
            "questionType": "text",
            "questionText": "Anything else?"
        }"#;
        let request: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate_shape().is_ok());
    }
}
