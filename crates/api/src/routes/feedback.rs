//! Feedback intake and dashboard endpoint handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    AnalyticsOverview, Feedback, FeedbackAction, FeedbackEntry, FeedbackStatus, ModerationStatus,
    NotificationEvent, Question, QuestionType, SubmitFeedbackRequest, SubmitFeedbackResponse,
    SubmittedAnswer, Urgency,
};
use domain::services::{extract_keywords, moderate_content, AnalysisRequest};
use persistence::entities::FeedbackWithCategoryEntity;
use persistence::repositories::{
    AnalyticsRepository, CategoryRepository, ClarificationRepository, FeedbackListFilter,
    FeedbackPatch, FeedbackRepository, NewFeedback, NewQuestionResponse, QuestionRepository,
    TagRepository,
};
use shared::access_code::{generate_access_code, hash_access_code};
use shared::pagination::{PageMeta, PageParams};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_feedback_submitted;
use crate::routes::{DataEnvelope, ListEnvelope};
use crate::services::notify::NotificationData;
use crate::services::webhook_events::{WebhookEvent, WebhookEventType};

/// Query parameters for `GET /api/feedback`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    /// `list` (default) or `analytics`.
    #[serde(rename = "type")]
    pub query_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<FeedbackStatus>,
    pub urgency: Option<Urgency>,
    pub moderation_status: Option<ModerationStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/feedback?type=list|analytics` - list with filters, or the
/// aggregate analytics payload.
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> Result<axum::response::Response, ApiError> {
    use axum::response::IntoResponse;

    if query.query_type.as_deref() == Some("analytics") {
        let analytics = build_analytics(&state).await?;
        return Ok(Json(DataEnvelope::new(analytics)).into_response());
    }

    let page = PageParams {
        limit: query.limit,
        offset: query.offset,
    };
    let filter = FeedbackListFilter {
        status: query.status.map(Into::into),
        moderation_status: query.moderation_status.map(Into::into),
        urgency: query.urgency.map(Into::into),
        category: query.category.clone(),
    };

    let repo = FeedbackRepository::new(state.pool.clone());
    let total = repo.count(&filter).await?;
    let rows = repo.list(&filter, page.limit(), page.offset()).await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(load_entry(&state, row, false).await?);
    }

    let meta = PageMeta::new(total, page.limit(), page.offset());
    Ok(Json(ListEnvelope::new(entries, meta)).into_response())
}

/// `POST /api/feedback` - anonymous submission.
///
/// Moderation, keyword extraction and AI analysis run inline; the AI call
/// and all notification fan-out are best-effort and can never fail the
/// submission itself.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<SubmitFeedbackResponse>>), ApiError> {
    request.validate()?;

    let access_code = generate_access_code();
    let access_code_hash = hash_access_code(&access_code);

    let combined = format!("{} {}", request.description, request.subject);
    let moderation = moderate_content(&combined);
    let keywords = extract_keywords(&combined);

    let category_repo = CategoryRepository::new(state.pool.clone());
    let categories: Vec<domain::models::Category> = category_repo
        .find_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let matched_category = categories.iter().find(|c| c.name == request.category);
    let category_id = matched_category.map(|c| c.id);
    let category_label = matched_category
        .map(|c| c.label.clone())
        .unwrap_or_else(|| request.category.clone());

    let tag_repo = TagRepository::new(state.pool.clone());
    let active_tag_names: Vec<String> = tag_repo
        .find_active()
        .await?
        .into_iter()
        .map(|t| t.name)
        .collect();

    // Best-effort AI analysis; any error means "no analysis available".
    let analysis = match state
        .analyzer
        .analyze(&AnalysisRequest {
            subject: request.subject.clone(),
            description: request.description.clone(),
            impact: request.impact.clone(),
            suggested_solution: request.suggested_solution.clone(),
            categories: categories.iter().map(|c| c.name.clone()).collect(),
            tags: active_tag_names.clone(),
        })
        .await
    {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            warn!("AI analysis unavailable: {}", e);
            None
        }
    };

    // User-selected tags unioned with AI suggestions, first-seen order.
    let mut selected_tags = request.tags.clone();
    if let Some(ref analysis) = analysis {
        for tag in &analysis.suggested_tags {
            if !selected_tags.contains(tag) {
                selected_tags.push(tag.clone());
            }
        }
    }
    let tag_ids = tag_repo.find_ids_by_names(&selected_tags).await?;

    let question_repo = QuestionRepository::new(state.pool.clone());
    let active_questions: Vec<Question> = question_repo
        .find_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let responses = match &request.question_responses {
        Some(answers) => build_question_responses(answers, &active_questions)?,
        None => Vec::new(),
    };

    let ai_category = analysis.as_ref().and_then(|a| {
        categories
            .iter()
            .find(|c| c.name == a.suggested_category)
            .map(|c| c.name.clone())
    });

    let new = NewFeedback {
        access_code_hash,
        category_id,
        feedback_type: request.feedback_type.into(),
        urgency: request.urgency.into(),
        subject: request.subject.clone(),
        description: request.description.clone(),
        impact: request.impact.clone().filter(|s| !s.is_empty()),
        suggested_solution: request.suggested_solution.clone().filter(|s| !s.is_empty()),
        allow_follow_up: request.allow_follow_up,
        moderation_status: moderation.initial_status().into(),
        moderation_flags: moderation.flags.clone(),
        moderation_score: moderation.score,
        keywords,
        ai_category,
        ai_sentiment: analysis.as_ref().map(|a| a.sentiment.into()),
        ai_priority: analysis.as_ref().map(|a| a.suggested_urgency.into()),
        ai_summary: analysis.as_ref().map(|a| a.summary.clone()),
        ai_keywords: analysis.as_ref().map(|a| a.key_topics.clone()),
        ai_category_suggestion: analysis.as_ref().map(|a| a.suggested_category.clone()),
        ai_urgency_suggestion: analysis.as_ref().map(|a| a.suggested_urgency.into()),
        ai_action_items: analysis.as_ref().map(|a| a.action_items.clone()),
    };

    let repo = FeedbackRepository::new(state.pool.clone());
    let entity = repo.create(new, &tag_ids, &responses).await?;

    record_feedback_submitted(moderation.initial_status().as_str());
    info!(
        id = %entity.id,
        moderation_status = %moderation.initial_status(),
        moderation_score = moderation.score,
        "Feedback submitted"
    );

    state.notifier.dispatch_in_background(
        NotificationEvent::NewFeedback,
        NotificationData {
            id: Some(entity.id),
            subject: Some(request.subject.clone()),
            category: Some(category_label),
            urgency: Some(request.urgency),
            feedback_type: Some(request.feedback_type),
        },
    );
    state.webhooks.clone().fan_out_in_background(WebhookEvent::new(
        WebhookEventType::FeedbackSubmitted,
        json!({
            "id": entity.id,
            "subject": request.subject,
            "urgency": request.urgency,
            "feedbackType": request.feedback_type,
            "category": request.category,
        }),
    ));

    let tracking_url = format!(
        "{}/track?code={}",
        state.config.portal.base_url.trim_end_matches('/'),
        access_code
    );

    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::new(SubmitFeedbackResponse {
            access_code,
            id: entity.id,
            tracking_url,
        })),
    ))
}

/// `GET /api/feedback/:id` - single item with joins.
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataEnvelope<FeedbackEntry>>, ApiError> {
    let repo = FeedbackRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;

    let entry = load_entry(&state, row, true).await?;
    Ok(Json(DataEnvelope::new(entry)))
}

/// `PATCH /api/feedback/:id` - status updates and clarification requests.
pub async fn patch_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<FeedbackAction>,
) -> Result<Json<DataEnvelope<serde_json::Value>>, ApiError> {
    let repo = FeedbackRepository::new(state.pool.clone());
    let current = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;
    let current: Feedback = current.feedback.into();

    match action {
        FeedbackAction::UpdateStatus { status } => {
            // Resolved is terminal.
            if current.status == FeedbackStatus::Resolved && status != FeedbackStatus::Resolved {
                return Err(ApiError::Validation(
                    "Resolved feedback cannot be reopened".to_string(),
                ));
            }

            let updated = repo
                .update(
                    id,
                    &FeedbackPatch {
                        status: Some(status.into()),
                        ..Default::default()
                    },
                )
                .await?
                .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;
            let updated: Feedback = updated.into();

            state.webhooks.clone().fan_out_in_background(WebhookEvent::new(
                WebhookEventType::FeedbackUpdated,
                json!({
                    "id": updated.id,
                    "status": updated.status,
                    "resolvedAt": updated.resolved_at,
                }),
            ));

            Ok(Json(DataEnvelope::new(json!({
                "id": updated.id,
                "status": updated.status,
                "resolvedAt": updated.resolved_at,
            }))))
        }
        FeedbackAction::RequestClarification { question } => {
            let question = question.trim().to_string();
            if question.is_empty() || question.len() > 1000 {
                return Err(ApiError::Validation(
                    "Question must be 1-1000 characters".to_string(),
                ));
            }

            // Submitter opted out of follow-ups: reject, don't drop.
            if !current.allow_follow_up {
                return Err(ApiError::Validation(
                    "The submitter opted out of follow-up questions".to_string(),
                ));
            }

            let clarification_repo = ClarificationRepository::new(state.pool.clone());
            let clarification = clarification_repo.create(id, &question).await?;

            state.webhooks.clone().fan_out_in_background(WebhookEvent::new(
                WebhookEventType::ClarificationRequested,
                json!({
                    "feedbackId": id,
                    "clarificationId": clarification.id,
                    "question": question,
                }),
            ));

            Ok(Json(DataEnvelope::new(json!({
                "id": clarification.id,
                "feedbackId": clarification.feedback_id,
                "question": clarification.question,
                "createdAt": clarification.created_at,
            }))))
        }
    }
}

/// Request payload for appending an admin note.
#[derive(Debug, Deserialize, Validate)]
pub struct AddNoteRequest {
    #[validate(length(min = 1, max = 2000, message = "Note must be 1-2000 characters"))]
    pub note: String,
}

/// `POST /api/feedback/:id/notes` - append one timestamped admin note.
pub async fn add_admin_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddNoteRequest>,
) -> Result<Json<DataEnvelope<Feedback>>, ApiError> {
    request.validate()?;

    let repo = FeedbackRepository::new(state.pool.clone());
    let updated = repo
        .append_admin_note(id, &request.note)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;

    Ok(Json(DataEnvelope::new(updated.into())))
}

/// Builds the joined feedback view consumed by the dashboard and the
/// tracking portal. Question responses are loaded only for single-item
/// views.
pub(crate) async fn load_entry(
    state: &AppState,
    row: FeedbackWithCategoryEntity,
    include_responses: bool,
) -> Result<FeedbackEntry, ApiError> {
    let category_name = row.category_name.clone();
    let category_label = row.category_label.clone();
    let feedback: Feedback = row.feedback.into();

    let feedback_repo = FeedbackRepository::new(state.pool.clone());
    let tags = feedback_repo.tag_names(feedback.id).await?;

    let clarification_repo = ClarificationRepository::new(state.pool.clone());
    let clarifications = clarification_repo
        .find_by_feedback_id(feedback.id)
        .await?
        .into_iter()
        .map(|entity| domain::models::Clarification::from(entity).into())
        .collect();

    let responses = if include_responses {
        let question_repo = QuestionRepository::new(state.pool.clone());
        question_repo
            .responses_for_feedback(feedback.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect()
    } else {
        Vec::new()
    };

    Ok(FeedbackEntry {
        id: feedback.id,
        access_code_hash: feedback.access_code_hash,
        category_id: feedback.category_id,
        feedback_type: feedback.feedback_type,
        urgency: feedback.urgency,
        subject: feedback.subject,
        description: feedback.description,
        impact: feedback.impact,
        suggested_solution: feedback.suggested_solution,
        allow_follow_up: feedback.allow_follow_up,
        status: feedback.status,
        moderation_status: feedback.moderation_status,
        moderation_flags: feedback.moderation_flags,
        moderation_score: feedback.moderation_score,
        keywords: feedback.keywords,
        ai_category: feedback.ai_category,
        ai_sentiment: feedback.ai_sentiment,
        ai_priority: feedback.ai_priority,
        ai_summary: feedback.ai_summary,
        ai_keywords: feedback.ai_keywords,
        ai_category_suggestion: feedback.ai_category_suggestion,
        ai_urgency_suggestion: feedback.ai_urgency_suggestion,
        ai_action_items: feedback.ai_action_items,
        admin_notes: feedback.admin_notes,
        resolved_at: feedback.resolved_at,
        created_at: feedback.created_at,
        updated_at: feedback.updated_at,
        category: category_name.unwrap_or_default(),
        category_label,
        tags,
        clarifications,
        responses,
    })
}

/// Types each submitted answer against its question's declared type.
/// Unknown question ids are skipped; type mismatches and out-of-range
/// ratings are validation errors.
fn build_question_responses(
    answers: &HashMap<Uuid, SubmittedAnswer>,
    questions: &[Question],
) -> Result<Vec<NewQuestionResponse>, ApiError> {
    let mut responses = Vec::new();

    for (question_id, answer) in answers {
        let Some(question) = questions.iter().find(|q| q.id == *question_id) else {
            continue;
        };

        let response = match question.question_type {
            QuestionType::Rating => {
                let value = match answer {
                    SubmittedAnswer::Number(n) => *n,
                    SubmittedAnswer::Text(s) => s.trim().parse::<i32>().map_err(|_| {
                        ApiError::Validation(format!(
                            "Rating answer for \"{}\" must be a number",
                            question.question_text
                        ))
                    })?,
                };
                let min = question.min_value.unwrap_or(1);
                let max = question.max_value.unwrap_or(5);
                if value < min || value > max {
                    return Err(ApiError::Validation(format!(
                        "Rating for \"{}\" must be between {} and {}",
                        question.question_text, min, max
                    )));
                }
                NewQuestionResponse {
                    question_id: *question_id,
                    response_value: None,
                    response_number: Some(value),
                    response_option: None,
                }
            }
            QuestionType::MultipleChoice | QuestionType::Select => {
                let value = match answer {
                    SubmittedAnswer::Text(s) => s.clone(),
                    SubmittedAnswer::Number(n) => n.to_string(),
                };
                if let Some(options) = &question.options {
                    if !options.contains(&value) {
                        return Err(ApiError::Validation(format!(
                            "\"{}\" is not a valid option for \"{}\"",
                            value, question.question_text
                        )));
                    }
                }
                NewQuestionResponse {
                    question_id: *question_id,
                    response_value: None,
                    response_number: None,
                    response_option: Some(value),
                }
            }
            QuestionType::Text | QuestionType::Textarea => {
                let value = match answer {
                    SubmittedAnswer::Text(s) => s.clone(),
                    SubmittedAnswer::Number(n) => n.to_string(),
                };
                NewQuestionResponse {
                    question_id: *question_id,
                    response_value: Some(value),
                    response_number: None,
                    response_option: None,
                }
            }
        };
        responses.push(response);
    }

    Ok(responses)
}

/// Assembles the aggregate analytics payload.
async fn build_analytics(state: &AppState) -> Result<AnalyticsOverview, ApiError> {
    let repo = AnalyticsRepository::new(state.pool.clone());

    let totals = repo.status_totals().await?;
    let status_breakdown = repo
        .count_by_status()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let category_breakdown = repo
        .count_by_category()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let urgency_breakdown = repo
        .count_by_urgency()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let type_breakdown = repo
        .count_by_type()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let sentiment_breakdown = repo
        .count_by_sentiment()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let daily_trend = repo
        .daily_trend()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let top_keywords = repo
        .top_keywords()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(AnalyticsOverview {
        total: totals.total,
        resolved: totals.resolved,
        pending: totals.pending,
        in_progress: totals.in_progress,
        resolution_rate: AnalyticsOverview::resolution_rate(totals.resolved, totals.total),
        status_breakdown,
        category_breakdown,
        urgency_breakdown,
        type_breakdown,
        sentiment_breakdown,
        daily_trend,
        top_keywords,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn question(question_type: QuestionType) -> Question {
        Question {
            id: Uuid::new_v4(),
            question_type,
            question_text: "How satisfied are you?".into(),
            description: None,
            options: None,
            is_required: false,
            is_active: true,
            sort_order: 0,
            min_value: Some(1),
            max_value: Some(5),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rating_answer_typed_as_number() {
        let q = question(QuestionType::Rating);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Number(4))]);
        let responses = build_question_responses(&answers, &[q]).unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].response_number, Some(4));
        assert!(responses[0].response_value.is_none());
        assert!(responses[0].response_option.is_none());
    }

    #[test]
    fn test_rating_answer_parses_numeric_text() {
        let q = question(QuestionType::Rating);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Text(" 3 ".into()))]);
        let responses = build_question_responses(&answers, &[q]).unwrap();
        assert_eq!(responses[0].response_number, Some(3));
    }

    #[test]
    fn test_rating_out_of_bounds_rejected() {
        let q = question(QuestionType::Rating);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Number(9))]);
        let result = build_question_responses(&answers, &[q]);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_rating_non_numeric_rejected() {
        let q = question(QuestionType::Rating);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Text("great".into()))]);
        let result = build_question_responses(&answers, &[q]);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_choice_answer_must_match_options() {
        let mut q = question(QuestionType::Select);
        q.options = Some(vec!["North".into(), "South".into()]);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Text("East".into()))]);
        let result = build_question_responses(&answers, &[q]);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_choice_answer_typed_as_option() {
        let mut q = question(QuestionType::MultipleChoice);
        q.options = Some(vec!["North".into(), "South".into()]);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Text("North".into()))]);
        let responses = build_question_responses(&answers, &[q]).unwrap();
        assert_eq!(responses[0].response_option.as_deref(), Some("North"));
        assert!(responses[0].response_number.is_none());
    }

    #[test]
    fn test_text_answer_typed_as_value() {
        let q = question(QuestionType::Textarea);
        let answers = HashMap::from([(q.id, SubmittedAnswer::Text("All good".into()))]);
        let responses = build_question_responses(&answers, &[q]).unwrap();
        assert_eq!(responses[0].response_value.as_deref(), Some("All good"));
    }

    #[test]
    fn test_unknown_question_id_skipped() {
        let q = question(QuestionType::Rating);
        let answers = HashMap::from([(Uuid::new_v4(), SubmittedAnswer::Number(3))]);
        let responses = build_question_responses(&answers, &[q]).unwrap();
        assert!(responses.is_empty());
    }

    #[test]
    fn test_feedback_query_deserializes_type_param() {
        let query: FeedbackQuery =
            serde_json::from_str(r#"{"type": "analytics", "limit": 10}"#).unwrap();
        assert_eq!(query.query_type.as_deref(), Some("analytics"));
        assert_eq!(query.limit, Some(10));
        assert!(query.status.is_none());
    }

    #[test]
    fn test_feedback_query_status_enum() {
        let query: FeedbackQuery =
            serde_json::from_str(r#"{"status": "in-progress", "urgency": "high"}"#).unwrap();
        assert_eq!(query.status, Some(FeedbackStatus::InProgress));
        assert_eq!(query.urgency, Some(Urgency::High));
    }
}
