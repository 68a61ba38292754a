//! Category configuration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use persistence::repositories::CategoryRepository;
use shared::validation::slugify;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::DataEnvelope;

/// `?active=true` filter shared by the reference-data listings.
#[derive(Debug, Deserialize)]
pub struct ActiveFilter {
    #[serde(default)]
    pub active: Option<bool>,
}

/// `GET /api/categories[?active=true]`
pub async fn list_categories(
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> Result<Json<DataEnvelope<Vec<Category>>>, ApiError> {
    let repo = CategoryRepository::new(state.pool.clone());
    let entities = if filter.active.unwrap_or(false) {
        repo.find_active().await?
    } else {
        repo.find_all().await?
    };
    let categories = entities.into_iter().map(Into::into).collect();
    Ok(Json(DataEnvelope::new(categories)))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<Category>>), ApiError> {
    request.validate()?;

    let slug = slugify(&request.name);
    if slug.is_empty() {
        return Err(ApiError::Validation("Name must not be blank".to_string()));
    }

    let repo = CategoryRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &slug,
            &request.label,
            request.description.as_deref(),
            &request.color,
            &request.icon,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DataEnvelope::new(entity.into()))))
}

/// `PATCH /api/categories/:id`
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<DataEnvelope<Category>>, ApiError> {
    request.validate()?;

    let repo = CategoryRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.label.as_deref(),
            request.description.as_deref(),
            request.color.as_deref(),
            request.icon.as_deref(),
            request.is_active,
            request.sort_order,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(DataEnvelope::new(entity.into())))
}

/// `DELETE /api/categories/:id`
///
/// Deactivation (PATCH with `isActive: false`) is the preferred path;
/// deletion nulls the category on historical feedback.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CategoryRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
