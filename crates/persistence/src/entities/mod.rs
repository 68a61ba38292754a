//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Column names stay
//! snake_case here; the camelCase wire shape lives in the domain DTOs.

pub mod analytics;
pub mod branding;
pub mod category;
pub mod clarification;
pub mod feedback;
pub mod feedback_response;
pub mod notification_setting;
pub mod question;
pub mod tag;

pub use analytics::{
    DailyCountEntity, KeywordCountEntity, ModerationCountsEntity, NameCountEntity,
    StatusTotalsEntity,
};
pub use branding::BrandingEntity;
pub use category::CategoryEntity;
pub use clarification::ClarificationEntity;
pub use feedback::{
    FeedbackEntity, FeedbackStatusDb, FeedbackTypeDb, FeedbackWithCategoryEntity,
    ModerationStatusDb, SentimentDb, UrgencyDb,
};
pub use feedback_response::ResponseWithQuestionEntity;
pub use notification_setting::{NotificationChannelDb, NotificationSettingEntity};
pub use question::{QuestionEntity, QuestionTypeDb};
pub use tag::TagEntity;
