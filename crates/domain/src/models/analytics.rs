//! Analytics and moderation statistics DTOs.

use chrono::NaiveDate;
use serde::Serialize;

/// One slice of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub name: String,
    pub value: i64,
}

/// Submissions on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Frequency of one extracted keyword across all feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCount {
    pub word: String,
    pub count: i64,
}

/// Aggregate dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total: i64,
    pub resolved: i64,
    pub pending: i64,
    pub in_progress: i64,
    /// `round(resolved / total * 100)`, 0 when there is no feedback.
    pub resolution_rate: i64,
    pub status_breakdown: Vec<BreakdownEntry>,
    pub category_breakdown: Vec<BreakdownEntry>,
    pub urgency_breakdown: Vec<BreakdownEntry>,
    pub type_breakdown: Vec<BreakdownEntry>,
    pub sentiment_breakdown: Vec<BreakdownEntry>,
    /// Trailing 30-day daily submission counts, ascending by date.
    pub daily_trend: Vec<DailyCount>,
    /// Top 20 keywords by frequency.
    pub top_keywords: Vec<KeywordCount>,
}

impl AnalyticsOverview {
    /// Computes the resolution rate for the given counts.
    pub fn resolution_rate(resolved: i64, total: i64) -> i64 {
        if total > 0 {
            ((resolved as f64 / total as f64) * 100.0).round() as i64
        } else {
            0
        }
    }
}

/// Moderation queue counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationStats {
    pub total: i64,
    pub pending: i64,
    pub flagged: i64,
    pub approved: i64,
    pub rejected: i64,
}
