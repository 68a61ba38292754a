//! AI categorization collaborator contract.
//!
//! The analyzer is a narrow external dependency: given submission text and
//! the live category/tag vocabularies it returns a structured suggestion.
//! Every failure mode degrades to an error the caller treats as "no
//! analysis available"; the submission path never depends on it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Sentiment, Urgency};

/// Input to one analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub subject: String,
    pub description: String,
    pub impact: Option<String>,
    pub suggested_solution: Option<String>,
    /// Active category slugs the suggestion should come from.
    pub categories: Vec<String>,
    /// Active tag names the suggested tags should come from.
    pub tags: Vec<String>,
}

/// Structured suggestion produced by the analyzer. Entirely advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAnalysis {
    pub suggested_category: String,
    pub suggested_urgency: Urgency,
    pub sentiment: Sentiment,
    pub summary: String,
    pub action_items: Vec<String>,
    pub key_topics: Vec<String>,
    pub is_actionable: bool,
    pub suggested_tags: Vec<String>,
}

/// Why no analysis is available.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analyzer is not configured")]
    NotConfigured,

    #[error("analysis timed out")]
    Timeout,

    #[error("analyzer request failed: {0}")]
    Http(String),

    #[error("analyzer returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// The analysis collaborator seam. The production implementation calls the
/// Gemini API; tests plug in [`MockAnalyzer`].
#[async_trait]
pub trait FeedbackAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<FeedbackAnalysis, AnalysisError>;
}

/// Canned analyzer for tests and offline development.
#[derive(Debug, Clone, Default)]
pub struct MockAnalyzer {
    /// Returned on every call; `None` simulates an unavailable provider.
    pub response: Option<FeedbackAnalysis>,
}

impl MockAnalyzer {
    pub fn unavailable() -> Self {
        Self { response: None }
    }

    pub fn returning(analysis: FeedbackAnalysis) -> Self {
        Self {
            response: Some(analysis),
        }
    }
}

#[async_trait]
impl FeedbackAnalyzer for MockAnalyzer {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<FeedbackAnalysis, AnalysisError> {
        match &self.response {
            Some(analysis) => Ok(analysis.clone()),
            None => Err(AnalysisError::NotConfigured),
        }
    }
}
