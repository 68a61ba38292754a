//! Clarification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Clarification;

/// Database row mapping for the clarifications table.
#[derive(Debug, Clone, FromRow)]
pub struct ClarificationEntity {
    pub id: Uuid,
    pub feedback_id: Uuid,
    pub question: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<ClarificationEntity> for Clarification {
    fn from(entity: ClarificationEntity) -> Self {
        Self {
            id: entity.id,
            feedback_id: entity.feedback_id,
            question: entity.question,
            response: entity.response,
            created_at: entity.created_at,
            responded_at: entity.responded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_unanswered() {
        let entity = ClarificationEntity {
            id: Uuid::new_v4(),
            feedback_id: Uuid::new_v4(),
            question: "Which building?".into(),
            response: None,
            created_at: Utc::now(),
            responded_at: None,
        };
        let clarification: Clarification = entity.clone().into();
        assert_eq!(clarification.id, entity.id);
        assert!(clarification.response.is_none());
        assert!(clarification.responded_at.is_none());
    }
}
