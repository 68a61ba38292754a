//! Tracking portal endpoint handlers.
//!
//! These routes are public: the access code itself is the credential.
//! Every lookup hashes the presented code and compares digests; a wrong
//! code and a nonexistent record are indistinguishable.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use domain::models::{FeedbackEntry, NotificationEvent, RespondClarificationRequest};
use persistence::repositories::{ClarificationRepository, FeedbackRepository};
use shared::access_code::hash_access_code;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::feedback::load_entry;
use crate::routes::DataEnvelope;
use crate::services::notify::NotificationData;
use crate::services::webhook_events::{WebhookEvent, WebhookEventType};

/// Request payload for tracking a submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[validate(length(min = 1, message = "Access code is required"))]
    pub access_code: String,
}

/// `POST /api/track` - look up a submission by access code.
///
/// An unknown code yields `data: null`, not an error, so callers cannot
/// probe for which codes exist.
pub async fn track_feedback(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> Result<Json<DataEnvelope<Option<FeedbackEntry>>>, ApiError> {
    request.validate()?;

    let access_code_hash = hash_access_code(&request.access_code);
    let repo = FeedbackRepository::new(state.pool.clone());

    let entry = match repo.find_by_access_code_hash(&access_code_hash).await? {
        Some(row) => Some(load_entry(&state, row, true).await?),
        None => None,
    };

    Ok(Json(DataEnvelope::new(entry)))
}

/// `POST /api/track/clarifications/:id` - answer a clarification.
///
/// The clarification must belong to the feedback item the access code
/// resolves to, and must still be unanswered. All failure modes return
/// the same not-found error so the caller cannot tell whether the code
/// or the clarification id was wrong.
pub async fn respond_to_clarification(
    State(state): State<AppState>,
    Path(clarification_id): Path<Uuid>,
    Json(request): Json<RespondClarificationRequest>,
) -> Result<Json<DataEnvelope<serde_json::Value>>, ApiError> {
    request.validate()?;

    let access_code_hash = hash_access_code(&request.access_code);
    let feedback_repo = FeedbackRepository::new(state.pool.clone());
    let feedback = feedback_repo
        .find_by_access_code_hash(&access_code_hash)
        .await?
        .ok_or_else(|| ApiError::NotFound("Clarification not found".to_string()))?;

    let clarification_repo = ClarificationRepository::new(state.pool.clone());
    let updated = clarification_repo
        .respond(clarification_id, feedback.feedback.id, &request.response)
        .await?
        .ok_or_else(|| ApiError::NotFound("Clarification not found".to_string()))?;

    state.notifier.dispatch_in_background(
        NotificationEvent::ClarificationResponse,
        NotificationData {
            id: Some(feedback.feedback.id),
            subject: Some(feedback.feedback.subject.clone()),
            ..Default::default()
        },
    );
    state.webhooks.clone().fan_out_in_background(WebhookEvent::new(
        WebhookEventType::ClarificationResponded,
        json!({
            "feedbackId": feedback.feedback.id,
            "clarificationId": updated.id,
        }),
    ));

    Ok(Json(DataEnvelope::new(json!({
        "id": updated.id,
        "respondedAt": updated.responded_at,
    }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_request_requires_access_code() {
        let request = TrackRequest {
            access_code: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_track_request_deserializes_camel_case() {
        let request: TrackRequest =
            serde_json::from_str(r#"{"accessCode": "K7QP-M2XW-9RTD"}"#).unwrap();
        assert_eq!(request.access_code, "K7QP-M2XW-9RTD");
        assert!(request.validate().is_ok());
    }
}
