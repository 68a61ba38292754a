//! Domain model definitions.

pub mod analytics;
pub mod branding;
pub mod category;
pub mod clarification;
pub mod feedback;
pub mod notification_setting;
pub mod question;
pub mod tag;

pub use analytics::{AnalyticsOverview, BreakdownEntry, DailyCount, KeywordCount, ModerationStats};
pub use branding::{BrandingSettings, UpdateBrandingRequest};
pub use category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
pub use clarification::{Clarification, ClarificationView, RespondClarificationRequest};
pub use feedback::{
    Feedback, FeedbackAction, FeedbackEntry, FeedbackStatus, FeedbackType, ModerationStatus,
    QuestionResponseView, Sentiment, SubmitFeedbackRequest, SubmitFeedbackResponse,
    SubmittedAnswer, Urgency,
};
pub use notification_setting::{
    ChannelConfig, ConfigDecodeError, NotificationChannel, NotificationEvent, NotificationSetting,
    UpsertNotificationSettingRequest,
};
pub use question::{CreateQuestionRequest, Question, QuestionType, UpdateQuestionRequest};
pub use tag::{CreateTagRequest, Tag, UpdateTagRequest};
