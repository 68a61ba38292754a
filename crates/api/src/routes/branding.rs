//! Branding settings endpoint handlers.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::{BrandingSettings, UpdateBrandingRequest};
use persistence::repositories::{BrandingPatch, BrandingRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::DataEnvelope;

/// `GET /api/branding` - public read for the portal shell. `data` is null
/// until the first upsert.
pub async fn get_branding(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Option<BrandingSettings>>>, ApiError> {
    let repo = BrandingRepository::new(state.pool.clone());
    let branding = repo.get().await?.map(Into::into);
    Ok(Json(DataEnvelope::new(branding)))
}

/// `PUT /api/branding` - partial upsert of the singleton row.
pub async fn update_branding(
    State(state): State<AppState>,
    Json(request): Json<UpdateBrandingRequest>,
) -> Result<Json<DataEnvelope<BrandingSettings>>, ApiError> {
    request.validate()?;

    let patch = BrandingPatch {
        site_name: request.site_name,
        site_description: request.site_description,
        logo_url: request.logo_url,
        primary_color: request.primary_color,
        secondary_color: request.secondary_color,
        accent_color: request.accent_color,
        trust_badge_1_title: request.trust_badge_1_title,
        trust_badge_1_description: request.trust_badge_1_description,
        trust_badge_2_title: request.trust_badge_2_title,
        trust_badge_2_description: request.trust_badge_2_description,
        trust_badge_3_title: request.trust_badge_3_title,
        trust_badge_3_description: request.trust_badge_3_description,
        custom_css: request.custom_css,
    };

    let repo = BrandingRepository::new(state.pool.clone());
    let entity = repo.upsert(&patch).await?;

    Ok(Json(DataEnvelope::new(entity.into())))
}
