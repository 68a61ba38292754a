//! Tag configuration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateTagRequest, Tag, UpdateTagRequest};
use persistence::repositories::TagRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::categories::ActiveFilter;
use crate::routes::DataEnvelope;

/// `GET /api/tags[?active=true]`
pub async fn list_tags(
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> Result<Json<DataEnvelope<Vec<Tag>>>, ApiError> {
    let repo = TagRepository::new(state.pool.clone());
    let entities = if filter.active.unwrap_or(false) {
        repo.find_active().await?
    } else {
        repo.find_all().await?
    };
    let tags = entities.into_iter().map(Into::into).collect();
    Ok(Json(DataEnvelope::new(tags)))
}

/// `POST /api/tags`
pub async fn create_tag(
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<Tag>>), ApiError> {
    request.validate()?;

    let repo = TagRepository::new(state.pool.clone());
    let entity = repo.create(request.name.trim(), &request.color).await?;

    Ok((StatusCode::CREATED, Json(DataEnvelope::new(entity.into()))))
}

/// `PATCH /api/tags/:id`
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTagRequest>,
) -> Result<Json<DataEnvelope<Tag>>, ApiError> {
    request.validate()?;

    let repo = TagRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.name.as_deref(),
            request.color.as_deref(),
            request.is_active,
            request.sort_order,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

    Ok(Json(DataEnvelope::new(entity.into())))
}

/// `DELETE /api/tags/:id`
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = TagRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Tag not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
