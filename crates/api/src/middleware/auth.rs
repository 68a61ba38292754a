//! Authentication middleware.
//!
//! Provides middleware for requiring the API key on gated routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::extractors::api_key::{ApiKeyAuth, API_KEY_HEADER};

/// Middleware that requires the shared API key.
///
/// Validates the `X-API-Key` header against the configured secret and
/// rejects mismatches. The auth result is stored in request extensions
/// for downstream handlers.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    match ApiKeyAuth::validate(&state.config.security, presented.as_deref()) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
