//! API key authentication extractor.
//!
//! Provides an Axum extractor for validating the shared API secret on
//! requests.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Header carrying the shared API secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Proof that the request passed the API key gate.
///
/// With no secret configured, the gate is open and `open_access` records
/// that the caller was not actually authenticated.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    /// True when no secret is configured and the request went ungated.
    pub open_access: bool,
}

impl ApiKeyAuth {
    /// Validates a presented key against the configured secret.
    ///
    /// An empty configured secret means open access, a deliberate
    /// development default; the startup log warns about it.
    pub fn validate(
        security: &SecurityConfig,
        presented: Option<&str>,
    ) -> Result<Self, ApiError> {
        if security.api_key.is_empty() {
            return Ok(ApiKeyAuth { open_access: true });
        }

        match presented {
            Some(key) if key == security.api_key => Ok(ApiKeyAuth { open_access: false }),
            _ => Err(ApiError::Unauthorized(
                "Invalid or missing API key".to_string(),
            )),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        Self::validate(&state.config.security, presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security(api_key: &str) -> SecurityConfig {
        SecurityConfig {
            api_key: api_key.to_string(),
            cors_origins: vec![],
            rate_limit_per_minute: 100,
        }
    }

    #[test]
    fn test_open_access_when_no_secret_configured() {
        let auth = ApiKeyAuth::validate(&security(""), None).unwrap();
        assert!(auth.open_access);
    }

    #[test]
    fn test_open_access_ignores_presented_key() {
        let auth = ApiKeyAuth::validate(&security(""), Some("anything")).unwrap();
        assert!(auth.open_access);
    }

    #[test]
    fn test_matching_key_accepted() {
        let auth = ApiKeyAuth::validate(&security("secret"), Some("secret")).unwrap();
        assert!(!auth.open_access);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let result = ApiKeyAuth::validate(&security("secret"), Some("wrong"));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_missing_key_rejected() {
        let result = ApiKeyAuth::validate(&security("secret"), None);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_key_comparison_is_case_sensitive() {
        let result = ApiKeyAuth::validate(&security("Secret"), Some("secret"));
        assert!(result.is_err());
    }
}
