//! Gemini-backed implementation of the feedback analyzer.
//!
//! Best-effort by contract: every failure mode (missing key, timeout,
//! transport error, malformed payload) surfaces as an `AnalysisError`
//! that the submission path treats as "no analysis available".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use domain::services::{AnalysisError, AnalysisRequest, FeedbackAnalysis, FeedbackAnalyzer};

use crate::config::AiConfig;

/// Analyzer calling the Gemini `generateContent` endpoint with a JSON
/// response schema.
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiAnalyzer {
    /// Create an analyzer from configuration. An empty key produces an
    /// analyzer that always reports `NotConfigured`.
    pub fn new(config: &AiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.gemini_api_key.clone(),
            api_url: config.api_url.clone(),
        }
    }

    /// JSON schema constraining the model's response shape.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "suggestedCategory": {
                    "type": "string",
                    "description": "The most appropriate category for this feedback"
                },
                "suggestedUrgency": {
                    "type": "string",
                    "enum": ["low", "medium", "high", "critical"],
                    "description": "Suggested urgency level based on content"
                },
                "sentiment": {
                    "type": "string",
                    "enum": ["positive", "neutral", "negative", "mixed"],
                    "description": "Overall sentiment of the feedback"
                },
                "summary": {
                    "type": "string",
                    "description": "A brief 1-2 sentence summary of the feedback"
                },
                "actionItems": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Specific actionable items extracted from the feedback"
                },
                "keyTopics": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Main topics or themes in the feedback"
                },
                "isActionable": {
                    "type": "boolean",
                    "description": "Whether this feedback contains actionable suggestions"
                },
                "suggestedTags": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Suggested tags based on content"
                }
            },
            "required": [
                "suggestedCategory", "suggestedUrgency", "sentiment", "summary",
                "actionItems", "keyTopics", "isActionable", "suggestedTags"
            ]
        })
    }

    fn build_prompt(request: &AnalysisRequest) -> String {
        let category_list = if request.categories.is_empty() {
            "Suggest an appropriate category name".to_string()
        } else {
            format!("Available categories: {}", request.categories.join(", "))
        };

        let tag_list = if request.tags.is_empty() {
            "Suggest relevant tags".to_string()
        } else {
            format!("Available tags to choose from: {}", request.tags.join(", "))
        };

        let impact = request
            .impact
            .as_deref()
            .map(|i| format!("Impact: {i}\n"))
            .unwrap_or_default();
        let solution = request
            .suggested_solution
            .as_deref()
            .map(|s| format!("Suggested Solution: {s}\n"))
            .unwrap_or_default();

        format!(
            "Analyze the following anonymous feedback and provide structured analysis.\n\n\
             {category_list}\n{tag_list}\n\n\
             FEEDBACK:\n\
             Subject: {subject}\n\n\
             Description: {description}\n\n\
             {impact}{solution}\n\
             Analyze this feedback and provide:\n\
             1. The most appropriate category from the available options\n\
             2. Suggested urgency level (low, medium, high, critical) based on:\n\
                - Critical: Safety issues, legal concerns, immediate business impact\n\
                - High: Significant employee wellbeing, major process failures\n\
                - Medium: Improvement opportunities, recurring issues\n\
                - Low: General suggestions, minor observations\n\
             3. Overall sentiment\n\
             4. A brief summary\n\
             5. Specific action items (if any)\n\
             6. Key topics/themes\n\
             7. Whether it's actionable\n\
             8. Relevant tags from the available options",
            subject = request.subject,
            description = request.description,
        )
    }
}

/// Gemini response envelope; only the first candidate's text matters.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Pulls the structured analysis out of a raw Gemini response body.
fn parse_analysis(body: &str) -> Result<FeedbackAnalysis, AnalysisError> {
    let envelope: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    let text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            AnalysisError::MalformedResponse("response contains no candidate text".into())
        })?;

    serde_json::from_str(&text).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl FeedbackAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<FeedbackAnalysis, AnalysisError> {
        if self.api_key.is_empty() {
            return Err(AnalysisError::NotConfigured);
        }

        let body = json!({
            "contents": [
                { "parts": [{ "text": Self::build_prompt(request) }] }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema(),
            }
        });

        let response = self
            .client
            .post(format!("{}?key={}", self.api_url, self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else {
                    AnalysisError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Http(format!(
                "analyzer returned status {status}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::Http(e.to_string()))?;

        parse_analysis(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{Sentiment, Urgency};

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            subject: "Parking lot lighting".into(),
            description: "The west lot is dark after evening shifts.".into(),
            impact: Some("People feel unsafe".into()),
            suggested_solution: None,
            categories: vec!["facilities".into(), "benefits".into()],
            tags: vec!["safety".into()],
        }
    }

    #[test]
    fn test_prompt_lists_vocabularies() {
        let prompt = GeminiAnalyzer::build_prompt(&request());
        assert!(prompt.contains("Available categories: facilities, benefits"));
        assert!(prompt.contains("Available tags to choose from: safety"));
        assert!(prompt.contains("Subject: Parking lot lighting"));
        assert!(prompt.contains("Impact: People feel unsafe"));
        assert!(!prompt.contains("Suggested Solution:"));
    }

    #[test]
    fn test_prompt_without_vocabularies() {
        let mut req = request();
        req.categories.clear();
        req.tags.clear();
        let prompt = GeminiAnalyzer::build_prompt(&req);
        assert!(prompt.contains("Suggest an appropriate category name"));
        assert!(prompt.contains("Suggest relevant tags"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = GeminiAnalyzer::response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 8);
        assert!(required.iter().any(|v| v == "suggestedCategory"));
        assert!(required.iter().any(|v| v == "suggestedTags"));
    }

    #[test]
    fn test_parse_analysis_from_candidate_text() {
        let inner = r#"{
            "suggestedCategory": "facilities",
            "suggestedUrgency": "high",
            "sentiment": "negative",
            "summary": "Lighting is inadequate in the west lot.",
            "actionItems": ["Survey lighting"],
            "keyTopics": ["parking", "safety"],
            "isActionable": true,
            "suggestedTags": ["safety"]
        }"#;
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": inner } ] } }
            ]
        })
        .to_string();

        let analysis = parse_analysis(&body).unwrap();
        assert_eq!(analysis.suggested_category, "facilities");
        assert_eq!(analysis.suggested_urgency, Urgency::High);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert!(analysis.is_actionable);
    }

    #[test]
    fn test_parse_analysis_empty_candidates() {
        let body = r#"{"candidates": []}"#;
        assert!(matches!(
            parse_analysis(body),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_analysis_invalid_json() {
        assert!(matches!(
            parse_analysis("not json"),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_analysis_text_not_matching_schema() {
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"unexpected\": true}" } ] } }
            ]
        })
        .to_string();
        assert!(matches!(
            parse_analysis(&body),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_analyzer_reports_not_configured() {
        let analyzer = GeminiAnalyzer::new(&AiConfig::default());
        assert!(matches!(
            analyzer.analyze(&request()).await,
            Err(AnalysisError::NotConfigured)
        ));
    }
}
