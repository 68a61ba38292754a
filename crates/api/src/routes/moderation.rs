//! Moderation queue endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use domain::models::{FeedbackEntry, ModerationStats, ModerationStatus};
use persistence::repositories::{AnalyticsRepository, FeedbackRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::feedback::load_entry;
use crate::routes::DataEnvelope;

/// `GET /api/moderation/queue` - flagged and still-pending items.
pub async fn get_queue(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<FeedbackEntry>>>, ApiError> {
    let repo = FeedbackRepository::new(state.pool.clone());
    let rows = repo.list_moderation_queue().await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(load_entry(&state, row, false).await?);
    }

    Ok(Json(DataEnvelope::new(entries)))
}

/// `GET /api/moderation/stats` - queue counters.
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<ModerationStats>>, ApiError> {
    let repo = AnalyticsRepository::new(state.pool.clone());
    let stats: ModerationStats = repo.moderation_counts().await?.into();
    Ok(Json(DataEnvelope::new(stats)))
}

/// Request payload for a single moderation decision.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationDecision {
    pub status: ModerationStatus,
    pub reason: Option<String>,
}

/// `PATCH /api/moderation/:id` - set one item's moderation status. A
/// rejection reason is recorded as an admin note.
pub async fn update_moderation_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(decision): Json<ModerationDecision>,
) -> Result<Json<DataEnvelope<serde_json::Value>>, ApiError> {
    let repo = FeedbackRepository::new(state.pool.clone());
    let updated = repo
        .update_moderation_status(id, decision.status.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;

    if decision.status == ModerationStatus::Rejected {
        if let Some(reason) = decision.reason.as_deref().filter(|r| !r.trim().is_empty()) {
            repo.append_admin_note(id, &format!("Moderation rejected: {reason}"))
                .await?;
        }
    }

    info!(id = %id, status = %decision.status, "Moderation status updated");

    Ok(Json(DataEnvelope::new(serde_json::json!({
        "id": updated.id,
        "moderationStatus": decision.status,
    }))))
}

/// Bulk moderation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Approve,
    Reject,
}

/// Request payload for bulk moderation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkModerationRequest {
    pub action: BulkAction,
    pub ids: Vec<Uuid>,
    pub reason: Option<String>,
}

/// Per-item outcome report for bulk moderation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkModerationResult {
    pub updated: usize,
    pub failed: Vec<Uuid>,
}

/// `POST /api/moderation/bulk` - approve or reject many items.
///
/// Items are processed independently: one failure never blocks or
/// corrupts the rest, and the response reports which ids failed.
pub async fn bulk_moderate(
    State(state): State<AppState>,
    Json(request): Json<BulkModerationRequest>,
) -> Result<Json<DataEnvelope<BulkModerationResult>>, ApiError> {
    if request.ids.is_empty() {
        return Err(ApiError::Validation("ids must not be empty".to_string()));
    }

    let status = match request.action {
        BulkAction::Approve => ModerationStatus::Approved,
        BulkAction::Reject => ModerationStatus::Rejected,
    };
    let reason = request
        .reason
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .map(|r| format!("Moderation rejected: {r}"));

    let repo = FeedbackRepository::new(state.pool.clone());
    let mut updated = 0usize;
    let mut failed = Vec::new();

    for id in &request.ids {
        match repo.update_moderation_status(*id, status.into()).await {
            Ok(Some(_)) => {
                if request.action == BulkAction::Reject {
                    if let Some(ref note) = reason {
                        if let Err(e) = repo.append_admin_note(*id, note).await {
                            tracing::warn!(id = %id, "Failed to record rejection reason: {}", e);
                        }
                    }
                }
                updated += 1;
            }
            Ok(None) => failed.push(*id),
            Err(e) => {
                tracing::warn!(id = %id, "Bulk moderation failed: {}", e);
                failed.push(*id);
            }
        }
    }

    info!(
        action = ?request.action,
        updated = updated,
        failed = failed.len(),
        "Bulk moderation completed"
    );

    Ok(Json(DataEnvelope::new(BulkModerationResult {
        updated,
        failed,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_deserializes() {
        let decision: ModerationDecision =
            serde_json::from_str(r#"{"status": "rejected", "reason": "spam"}"#).unwrap();
        assert_eq!(decision.status, ModerationStatus::Rejected);
        assert_eq!(decision.reason.as_deref(), Some("spam"));
    }

    #[test]
    fn test_bulk_request_deserializes() {
        let request: BulkModerationRequest = serde_json::from_str(
            r#"{"action": "approve", "ids": ["550e8400-e29b-41d4-a716-446655440000"]}"#,
        )
        .unwrap();
        assert_eq!(request.action, BulkAction::Approve);
        assert_eq!(request.ids.len(), 1);
        assert!(request.reason.is_none());
    }

    #[test]
    fn test_bulk_action_unknown_rejected() {
        assert!(serde_json::from_str::<BulkAction>("\"purge\"").is_err());
    }

    #[test]
    fn test_bulk_result_serializes_camel_case() {
        let result = BulkModerationResult {
            updated: 3,
            failed: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"updated":3,"failed":[]}"#);
    }
}
