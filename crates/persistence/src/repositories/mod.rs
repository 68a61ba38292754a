//! Repository implementations for database operations.

pub mod analytics;
pub mod branding;
pub mod category;
pub mod clarification;
pub mod feedback;
pub mod notification_setting;
pub mod question;
pub mod tag;

pub use analytics::AnalyticsRepository;
pub use branding::{BrandingPatch, BrandingRepository};
pub use category::CategoryRepository;
pub use clarification::ClarificationRepository;
pub use feedback::{
    FeedbackListFilter, FeedbackPatch, FeedbackRepository, NewFeedback, NewQuestionResponse,
};
pub use notification_setting::{NotificationSettingPatch, NotificationSettingRepository};
pub use question::QuestionRepository;
pub use tag::TagRepository;
