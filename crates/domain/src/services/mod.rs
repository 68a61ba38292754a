//! Domain services.

pub mod analysis;
pub mod keywords;
pub mod moderation;

pub use analysis::{AnalysisError, AnalysisRequest, FeedbackAnalysis, FeedbackAnalyzer};
pub use keywords::extract_keywords;
pub use moderation::{moderate_content, ModerationOutcome};
