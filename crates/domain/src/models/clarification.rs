//! Clarification (admin follow-up question) model.
//!
//! A clarification has two states: asked (`response` null) and responded
//! (`response` and `responded_at` set, exactly once). Only the anonymous
//! submitter holding the matching access code can move it forward, and
//! there is no transition back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An admin-authored follow-up question attached to one feedback item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clarification {
    pub id: Uuid,
    pub feedback_id: Uuid,
    pub question: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

/// Clarification as embedded in feedback views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationView {
    pub id: Uuid,
    pub question: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<Clarification> for ClarificationView {
    fn from(c: Clarification) -> Self {
        Self {
            id: c.id,
            question: c.question,
            response: c.response,
            created_at: c.created_at,
            responded_at: c.responded_at,
        }
    }
}

/// Payload for the anonymous submitter answering a clarification.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondClarificationRequest {
    #[validate(length(min = 1, message = "Access code is required"))]
    pub access_code: String,

    #[validate(length(min = 1, max = 5000, message = "Response must be 1-5000 characters"))]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_conversion_preserves_state() {
        let clarification = Clarification {
            id: Uuid::new_v4(),
            feedback_id: Uuid::new_v4(),
            question: "Which shift does this affect?".into(),
            response: Some("Night shift".into()),
            created_at: Utc::now(),
            responded_at: Some(Utc::now()),
        };
        let view: ClarificationView = clarification.clone().into();
        assert_eq!(view.id, clarification.id);
        assert_eq!(view.response.as_deref(), Some("Night shift"));
        assert!(view.responded_at.is_some());
    }

    #[test]
    fn test_unanswered_view_omits_responded_at() {
        let view = ClarificationView {
            id: Uuid::new_v4(),
            question: "Where?".into(),
            response: None,
            created_at: Utc::now(),
            responded_at: None,
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("respondedAt"));
        assert!(json.contains("\"response\":null"));
    }

    #[test]
    fn test_respond_request_validation() {
        let request = RespondClarificationRequest {
            access_code: "K7QP-M2XW-9RTD".into(),
            response: String::new(),
        };
        assert!(request.validate().is_err());

        let request = RespondClarificationRequest {
            access_code: "K7QP-M2XW-9RTD".into(),
            response: "It happens every Monday".into(),
        };
        assert!(request.validate().is_ok());
    }
}
