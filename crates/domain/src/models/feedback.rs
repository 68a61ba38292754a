//! Feedback domain model and request/response payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::clarification::ClarificationView;

/// Kind of feedback the submitter is giving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Suggestion,
    Concern,
    Praise,
    Question,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Suggestion => "suggestion",
            FeedbackType::Concern => "concern",
            FeedbackType::Praise => "praise",
            FeedbackType::Question => "question",
        }
    }
}

impl std::fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submitter- or AI-suggested priority tier, distinct from workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    /// Whether this tier should also trigger urgent-feedback notifications.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Medium
    }
}

/// Workflow status. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStatus {
    Received,
    InProgress,
    Resolved,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Received => "received",
            FeedbackStatus::InProgress => "in-progress",
            FeedbackStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation queue status assigned at creation and curated by admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Flagged,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Flagged => "flagged",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AI-derived sentiment tag. Advisory, never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The central feedback entity.
///
/// `access_code_hash` is the only identity surface ever stored; the
/// plaintext code exists once, in the submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub access_code_hash: String,
    pub category_id: Option<Uuid>,
    pub feedback_type: FeedbackType,
    pub urgency: Urgency,
    pub subject: String,
    pub description: String,
    pub impact: Option<String>,
    pub suggested_solution: Option<String>,
    pub allow_follow_up: bool,
    pub status: FeedbackStatus,
    pub moderation_status: ModerationStatus,
    pub moderation_flags: Vec<String>,
    pub moderation_score: i32,
    pub keywords: Vec<String>,
    pub ai_category: Option<String>,
    pub ai_sentiment: Option<Sentiment>,
    pub ai_priority: Option<Urgency>,
    pub ai_summary: Option<String>,
    pub ai_keywords: Option<Vec<String>>,
    pub ai_category_suggestion: Option<String>,
    pub ai_urgency_suggestion: Option<Urgency>,
    pub ai_action_items: Option<Vec<String>>,
    pub admin_notes: Vec<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A submitted answer to a configured question. Ratings arrive as numbers,
/// everything else as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Number(i32),
    Text(String),
}

/// Request payload for submitting feedback.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    /// Category slug, matched against active categories.
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    pub feedback_type: FeedbackType,

    #[serde(default)]
    pub urgency: Urgency,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,

    #[serde(default)]
    pub impact: Option<String>,

    #[serde(default)]
    pub suggested_solution: Option<String>,

    /// Tag names; unioned with AI-suggested tags when analysis succeeds.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_allow_follow_up")]
    pub allow_follow_up: bool,

    /// Answers keyed by question id.
    #[serde(default)]
    pub question_responses: Option<HashMap<Uuid, SubmittedAnswer>>,
}

fn default_allow_follow_up() -> bool {
    true
}

/// Response payload for a successful submission. The access code appears
/// here and nowhere else.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackResponse {
    pub access_code: String,
    pub id: Uuid,
    pub tracking_url: String,
}

/// Mutation actions accepted by `PATCH /api/feedback/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FeedbackAction {
    UpdateStatus { status: FeedbackStatus },
    RequestClarification { question: String },
}

/// A question response joined with its question text for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponseView {
    pub question_id: Uuid,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_option: Option<String>,
}

/// A feedback item joined with category, tags, clarifications and question
/// responses, as consumed by the dashboard and the tracking portal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub access_code_hash: String,
    pub category_id: Option<Uuid>,
    pub feedback_type: FeedbackType,
    pub urgency: Urgency,
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_solution: Option<String>,
    pub allow_follow_up: bool,
    pub status: FeedbackStatus,
    pub moderation_status: ModerationStatus,
    pub moderation_flags: Vec<String>,
    pub moderation_score: i32,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_priority: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_category_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_urgency_suggestion: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_action_items: Option<Vec<String>>,
    pub admin_notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Category slug, empty when uncategorized.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_label: Option<String>,
    pub tags: Vec<String>,
    pub clarifications: Vec<ClarificationView>,
    pub responses: Vec<QuestionResponseView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_minimal_defaults() {
        let json = r#"{
            "category": "facilities",
            "feedbackType": "suggestion",
            "subject": "Parking lot lighting",
            "description": "The west parking lot is poorly lit after evening shifts."
        }"#;

        let request: SubmitFeedbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.urgency, Urgency::Medium);
        assert!(request.tags.is_empty());
        assert!(request.allow_follow_up);
        assert!(request.impact.is_none());
        assert!(request.question_responses.is_none());
    }

    #[test]
    fn test_submit_request_all_fields() {
        let json = r#"{
            "category": "workplace-safety",
            "feedbackType": "concern",
            "urgency": "high",
            "subject": "Broken handrail",
            "description": "The stairwell handrail on floor 3 is loose.",
            "impact": "Someone could fall",
            "suggestedSolution": "Replace the mounting brackets",
            "tags": ["safety", "building"],
            "allowFollowUp": false
        }"#;

        let request: SubmitFeedbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.urgency, Urgency::High);
        assert_eq!(request.tags.len(), 2);
        assert!(!request.allow_follow_up);
        assert_eq!(request.impact.as_deref(), Some("Someone could fall"));
    }

    #[test]
    fn test_submit_request_validation_rejects_empty_subject() {
        let request = SubmitFeedbackRequest {
            category: "facilities".into(),
            feedback_type: FeedbackType::Suggestion,
            urgency: Urgency::Medium,
            subject: String::new(),
            description: "Some description".into(),
            impact: None,
            suggested_solution: None,
            tags: vec![],
            allow_follow_up: true,
            question_responses: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_submitted_answer_untagged() {
        let num: SubmittedAnswer = serde_json::from_str("4").unwrap();
        assert!(matches!(num, SubmittedAnswer::Number(4)));

        let text: SubmittedAnswer = serde_json::from_str("\"Very satisfied\"").unwrap();
        assert!(matches!(text, SubmittedAnswer::Text(ref s) if s == "Very satisfied"));
    }

    #[test]
    fn test_feedback_status_kebab_case() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let status: FeedbackStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, FeedbackStatus::InProgress);
    }

    #[test]
    fn test_urgency_ordering_and_urgent_check() {
        assert!(Urgency::Critical > Urgency::High);
        assert!(Urgency::High.is_urgent());
        assert!(Urgency::Critical.is_urgent());
        assert!(!Urgency::Medium.is_urgent());
        assert!(!Urgency::Low.is_urgent());
    }

    #[test]
    fn test_feedback_action_update_status() {
        let json = r#"{"action": "update_status", "status": "resolved"}"#;
        let action: FeedbackAction = serde_json::from_str(json).unwrap();
        assert!(matches!(
            action,
            FeedbackAction::UpdateStatus {
                status: FeedbackStatus::Resolved
            }
        ));
    }

    #[test]
    fn test_feedback_action_request_clarification() {
        let json = r#"{"action": "request_clarification", "question": "Which building?"}"#;
        let action: FeedbackAction = serde_json::from_str(json).unwrap();
        assert!(matches!(
            action,
            FeedbackAction::RequestClarification { ref question } if question == "Which building?"
        ));
    }

    #[test]
    fn test_feedback_action_unknown_rejected() {
        let json = r#"{"action": "delete_everything"}"#;
        assert!(serde_json::from_str::<FeedbackAction>(json).is_err());
    }

    #[test]
    fn test_enum_display_round_trips() {
        assert_eq!(FeedbackType::Praise.to_string(), "praise");
        assert_eq!(Urgency::Critical.to_string(), "critical");
        assert_eq!(FeedbackStatus::InProgress.to_string(), "in-progress");
        assert_eq!(ModerationStatus::Flagged.to_string(), "flagged");
        assert_eq!(Sentiment::Mixed.to_string(), "mixed");
    }
}
