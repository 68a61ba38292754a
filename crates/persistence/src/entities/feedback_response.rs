//! Feedback question-response entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

use domain::models::QuestionResponseView;

/// Response row joined with its question text for display.
///
/// Exactly one of `response_value`, `response_number`, `response_option`
/// is set, depending on the question's declared type.
#[derive(Debug, Clone, FromRow)]
pub struct ResponseWithQuestionEntity {
    pub question_id: Uuid,
    pub question_text: String,
    pub response_value: Option<String>,
    pub response_number: Option<i32>,
    pub response_option: Option<String>,
}

impl From<ResponseWithQuestionEntity> for QuestionResponseView {
    fn from(entity: ResponseWithQuestionEntity) -> Self {
        Self {
            question_id: entity.question_id,
            question_text: entity.question_text,
            response_value: entity.response_value,
            response_number: entity.response_number,
            response_option: entity.response_option,
        }
    }
}
