//! Feedback entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{
    Feedback, FeedbackStatus, FeedbackType, ModerationStatus, Sentiment, Urgency,
};

/// Database representation of `feedback_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "feedback_type", rename_all = "lowercase")]
pub enum FeedbackTypeDb {
    Suggestion,
    Concern,
    Praise,
    Question,
}

impl From<FeedbackTypeDb> for FeedbackType {
    fn from(db: FeedbackTypeDb) -> Self {
        match db {
            FeedbackTypeDb::Suggestion => FeedbackType::Suggestion,
            FeedbackTypeDb::Concern => FeedbackType::Concern,
            FeedbackTypeDb::Praise => FeedbackType::Praise,
            FeedbackTypeDb::Question => FeedbackType::Question,
        }
    }
}

impl From<FeedbackType> for FeedbackTypeDb {
    fn from(t: FeedbackType) -> Self {
        match t {
            FeedbackType::Suggestion => FeedbackTypeDb::Suggestion,
            FeedbackType::Concern => FeedbackTypeDb::Concern,
            FeedbackType::Praise => FeedbackTypeDb::Praise,
            FeedbackType::Question => FeedbackTypeDb::Question,
        }
    }
}

/// Database representation of `urgency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "urgency", rename_all = "lowercase")]
pub enum UrgencyDb {
    Low,
    Medium,
    High,
    Critical,
}

impl From<UrgencyDb> for Urgency {
    fn from(db: UrgencyDb) -> Self {
        match db {
            UrgencyDb::Low => Urgency::Low,
            UrgencyDb::Medium => Urgency::Medium,
            UrgencyDb::High => Urgency::High,
            UrgencyDb::Critical => Urgency::Critical,
        }
    }
}

impl From<Urgency> for UrgencyDb {
    fn from(u: Urgency) -> Self {
        match u {
            Urgency::Low => UrgencyDb::Low,
            Urgency::Medium => UrgencyDb::Medium,
            Urgency::High => UrgencyDb::High,
            Urgency::Critical => UrgencyDb::Critical,
        }
    }
}

/// Database representation of `feedback_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "feedback_status", rename_all = "kebab-case")]
pub enum FeedbackStatusDb {
    Received,
    InProgress,
    Resolved,
}

impl From<FeedbackStatusDb> for FeedbackStatus {
    fn from(db: FeedbackStatusDb) -> Self {
        match db {
            FeedbackStatusDb::Received => FeedbackStatus::Received,
            FeedbackStatusDb::InProgress => FeedbackStatus::InProgress,
            FeedbackStatusDb::Resolved => FeedbackStatus::Resolved,
        }
    }
}

impl From<FeedbackStatus> for FeedbackStatusDb {
    fn from(s: FeedbackStatus) -> Self {
        match s {
            FeedbackStatus::Received => FeedbackStatusDb::Received,
            FeedbackStatus::InProgress => FeedbackStatusDb::InProgress,
            FeedbackStatus::Resolved => FeedbackStatusDb::Resolved,
        }
    }
}

/// Database representation of `moderation_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "moderation_status", rename_all = "lowercase")]
pub enum ModerationStatusDb {
    Pending,
    Approved,
    Flagged,
    Rejected,
}

impl From<ModerationStatusDb> for ModerationStatus {
    fn from(db: ModerationStatusDb) -> Self {
        match db {
            ModerationStatusDb::Pending => ModerationStatus::Pending,
            ModerationStatusDb::Approved => ModerationStatus::Approved,
            ModerationStatusDb::Flagged => ModerationStatus::Flagged,
            ModerationStatusDb::Rejected => ModerationStatus::Rejected,
        }
    }
}

impl From<ModerationStatus> for ModerationStatusDb {
    fn from(s: ModerationStatus) -> Self {
        match s {
            ModerationStatus::Pending => ModerationStatusDb::Pending,
            ModerationStatus::Approved => ModerationStatusDb::Approved,
            ModerationStatus::Flagged => ModerationStatusDb::Flagged,
            ModerationStatus::Rejected => ModerationStatusDb::Rejected,
        }
    }
}

/// Database representation of `sentiment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "sentiment", rename_all = "lowercase")]
pub enum SentimentDb {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl From<SentimentDb> for Sentiment {
    fn from(db: SentimentDb) -> Self {
        match db {
            SentimentDb::Positive => Sentiment::Positive,
            SentimentDb::Neutral => Sentiment::Neutral,
            SentimentDb::Negative => Sentiment::Negative,
            SentimentDb::Mixed => Sentiment::Mixed,
        }
    }
}

impl From<Sentiment> for SentimentDb {
    fn from(s: Sentiment) -> Self {
        match s {
            Sentiment::Positive => SentimentDb::Positive,
            Sentiment::Neutral => SentimentDb::Neutral,
            Sentiment::Negative => SentimentDb::Negative,
            Sentiment::Mixed => SentimentDb::Mixed,
        }
    }
}

/// Database row mapping for the feedback table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackEntity {
    pub id: Uuid,
    pub access_code_hash: String,
    pub category_id: Option<Uuid>,
    pub feedback_type: FeedbackTypeDb,
    pub urgency: UrgencyDb,
    pub subject: String,
    pub description: String,
    pub impact: Option<String>,
    pub suggested_solution: Option<String>,
    pub allow_follow_up: bool,
    pub status: FeedbackStatusDb,
    pub moderation_status: ModerationStatusDb,
    pub moderation_flags: Vec<String>,
    pub moderation_score: i32,
    pub keywords: Vec<String>,
    pub ai_category: Option<String>,
    pub ai_sentiment: Option<SentimentDb>,
    pub ai_priority: Option<UrgencyDb>,
    pub ai_summary: Option<String>,
    pub ai_keywords: Option<Vec<String>>,
    pub ai_category_suggestion: Option<String>,
    pub ai_urgency_suggestion: Option<UrgencyDb>,
    pub ai_action_items: Option<Vec<String>>,
    pub admin_notes: Vec<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FeedbackEntity> for Feedback {
    fn from(entity: FeedbackEntity) -> Self {
        Self {
            id: entity.id,
            access_code_hash: entity.access_code_hash,
            category_id: entity.category_id,
            feedback_type: entity.feedback_type.into(),
            urgency: entity.urgency.into(),
            subject: entity.subject,
            description: entity.description,
            impact: entity.impact,
            suggested_solution: entity.suggested_solution,
            allow_follow_up: entity.allow_follow_up,
            status: entity.status.into(),
            moderation_status: entity.moderation_status.into(),
            moderation_flags: entity.moderation_flags,
            moderation_score: entity.moderation_score,
            keywords: entity.keywords,
            ai_category: entity.ai_category,
            ai_sentiment: entity.ai_sentiment.map(Into::into),
            ai_priority: entity.ai_priority.map(Into::into),
            ai_summary: entity.ai_summary,
            ai_keywords: entity.ai_keywords,
            ai_category_suggestion: entity.ai_category_suggestion,
            ai_urgency_suggestion: entity.ai_urgency_suggestion.map(Into::into),
            ai_action_items: entity.ai_action_items,
            admin_notes: entity.admin_notes,
            resolved_at: entity.resolved_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Feedback row joined with its category's slug and label.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackWithCategoryEntity {
    #[sqlx(flatten)]
    pub feedback: FeedbackEntity,
    pub category_name: Option<String>,
    pub category_label: Option<String>,
}
