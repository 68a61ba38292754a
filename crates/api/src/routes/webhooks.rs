//! Advisory webhook registry endpoint handlers.
//!
//! Registrations live in process memory only and are lost on restart.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use shared::validation::validate_http_url;

use crate::app::AppState;
use crate::error::ApiError;

/// Request payload for registering a webhook endpoint.
#[derive(Debug, Deserialize)]
pub struct RegisterWebhookRequest {
    pub url: String,
}

/// Response listing the registered endpoints.
#[derive(Debug, Serialize)]
pub struct WebhookListResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub webhooks: Vec<String>,
}

/// `POST /api/webhooks` - register a delivery URL.
pub async fn register_webhook(
    State(state): State<AppState>,
    Json(request): Json<RegisterWebhookRequest>,
) -> Result<Json<WebhookListResponse>, ApiError> {
    validate_http_url(&request.url)
        .map_err(|_| ApiError::Validation("Invalid webhook URL".to_string()))?;

    let added = state.webhooks.register(&request.url);
    if added {
        info!(url = %request.url, "Webhook endpoint registered");
    }

    Ok(Json(WebhookListResponse {
        success: true,
        message: Some(
            if added {
                "Webhook registered"
            } else {
                "Webhook already registered"
            }
            .to_string(),
        ),
        webhooks: state.webhooks.list(),
    }))
}

/// `GET /api/webhooks` - list registered delivery URLs.
pub async fn list_webhooks(State(state): State<AppState>) -> Json<WebhookListResponse> {
    Json(WebhookListResponse {
        success: true,
        message: None,
        webhooks: state.webhooks.list(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserializes() {
        let request: RegisterWebhookRequest =
            serde_json::from_str(r#"{"url": "https://example.com/hook"}"#).unwrap();
        assert_eq!(request.url, "https://example.com/hook");
    }

    #[test]
    fn test_list_response_omits_null_message() {
        let response = WebhookListResponse {
            success: true,
            message: None,
            webhooks: vec![],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("message"));
        assert!(json.contains("\"webhooks\":[]"));
    }
}
