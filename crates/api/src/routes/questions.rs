//! Custom question configuration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateQuestionRequest, Question, UpdateQuestionRequest};
use persistence::repositories::QuestionRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::categories::ActiveFilter;
use crate::routes::DataEnvelope;

/// `GET /api/questions[?active=true]`
pub async fn list_questions(
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> Result<Json<DataEnvelope<Vec<Question>>>, ApiError> {
    let repo = QuestionRepository::new(state.pool.clone());
    let entities = if filter.active.unwrap_or(false) {
        repo.find_active().await?
    } else {
        repo.find_all().await?
    };
    let questions = entities.into_iter().map(Into::into).collect();
    Ok(Json(DataEnvelope::new(questions)))
}

/// `POST /api/questions`
pub async fn create_question(
    State(state): State<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<Question>>), ApiError> {
    request.validate()?;
    request.validate_shape().map_err(|e| {
        ApiError::Validation(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid question shape".to_string()),
        )
    })?;

    let options = request.options.as_ref().map(|o| json!(o));
    let repo = QuestionRepository::new(state.pool.clone());
    let entity = repo
        .create(
            request.question_type.into(),
            &request.question_text,
            request.description.as_deref(),
            options.as_ref(),
            request.is_required,
            request.min_value,
            request.max_value,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DataEnvelope::new(entity.into()))))
}

/// `PATCH /api/questions/:id`
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuestionRequest>,
) -> Result<Json<DataEnvelope<Question>>, ApiError> {
    request.validate()?;

    let options = request.options.as_ref().map(|o| json!(o));
    let repo = QuestionRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.question_text.as_deref(),
            request.description.as_deref(),
            options.as_ref(),
            request.is_required,
            request.is_active,
            request.sort_order,
            request.min_value,
            request.max_value,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?;

    Ok(Json(DataEnvelope::new(entity.into())))
}

/// `DELETE /api/questions/:id`
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = QuestionRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Question not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
