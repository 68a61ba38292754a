//! Question entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Question, QuestionType};

/// Database representation of `question_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "question_type", rename_all = "snake_case")]
pub enum QuestionTypeDb {
    Rating,
    MultipleChoice,
    Select,
    Text,
    Textarea,
}

impl From<QuestionTypeDb> for QuestionType {
    fn from(db: QuestionTypeDb) -> Self {
        match db {
            QuestionTypeDb::Rating => QuestionType::Rating,
            QuestionTypeDb::MultipleChoice => QuestionType::MultipleChoice,
            QuestionTypeDb::Select => QuestionType::Select,
            QuestionTypeDb::Text => QuestionType::Text,
            QuestionTypeDb::Textarea => QuestionType::Textarea,
        }
    }
}

impl From<QuestionType> for QuestionTypeDb {
    fn from(t: QuestionType) -> Self {
        match t {
            QuestionType::Rating => QuestionTypeDb::Rating,
            QuestionType::MultipleChoice => QuestionTypeDb::MultipleChoice,
            QuestionType::Select => QuestionTypeDb::Select,
            QuestionType::Text => QuestionTypeDb::Text,
            QuestionType::Textarea => QuestionTypeDb::Textarea,
        }
    }
}

/// Database row mapping for the questions table.
///
/// `options` is stored as a JSONB array of strings.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionEntity {
    pub id: Uuid,
    pub question_type: QuestionTypeDb,
    pub question_text: String,
    pub description: Option<String>,
    pub options: Option<serde_json::Value>,
    pub is_required: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QuestionEntity> for Question {
    fn from(entity: QuestionEntity) -> Self {
        let options = entity.options.and_then(|value| {
            serde_json::from_value::<Vec<String>>(value).ok()
        });
        Self {
            id: entity.id,
            question_type: entity.question_type.into(),
            question_text: entity.question_text,
            description: entity.description,
            options,
            is_required: entity.is_required,
            is_active: entity.is_active,
            sort_order: entity.sort_order,
            min_value: entity.min_value,
            max_value: entity.max_value,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity_with_options(options: Option<serde_json::Value>) -> QuestionEntity {
        QuestionEntity {
            id: Uuid::new_v4(),
            question_type: QuestionTypeDb::Select,
            question_text: "Which site?".into(),
            description: None,
            options,
            is_required: false,
            is_active: true,
            sort_order: 0,
            min_value: None,
            max_value: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_options_decoded_from_json_array() {
        let entity = entity_with_options(Some(json!(["North", "South"])));
        let question: Question = entity.into();
        assert_eq!(
            question.options,
            Some(vec!["North".to_string(), "South".to_string()])
        );
    }

    #[test]
    fn test_missing_options_become_none() {
        let entity = entity_with_options(None);
        let question: Question = entity.into();
        assert!(question.options.is_none());
    }

    #[test]
    fn test_malformed_options_become_none() {
        let entity = entity_with_options(Some(json!({"bad": "shape"})));
        let question: Question = entity.into();
        assert!(question.options.is_none());
    }

    #[test]
    fn test_question_type_round_trips() {
        for t in [
            QuestionType::Rating,
            QuestionType::MultipleChoice,
            QuestionType::Select,
            QuestionType::Text,
            QuestionType::Textarea,
        ] {
            let db: QuestionTypeDb = t.into();
            assert_eq!(QuestionType::from(db), t);
        }
    }
}
