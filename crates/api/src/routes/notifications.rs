//! Notification channel settings endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use domain::models::{
    ChannelConfig, NotificationChannel, NotificationSetting, UpsertNotificationSettingRequest,
};
use persistence::repositories::{NotificationSettingPatch, NotificationSettingRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{DataEnvelope, MessageEnvelope};

/// `GET /api/settings/notifications` - all channel settings rows.
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<NotificationSetting>>>, ApiError> {
    let repo = NotificationSettingRepository::new(state.pool.clone());
    let settings = repo.find_all().await?.into_iter().map(Into::into).collect();
    Ok(Json(DataEnvelope::new(settings)))
}

/// `PUT /api/settings/notifications/:channel` - upsert one channel.
///
/// When a config payload is supplied it must decode as the channel's
/// tagged shape; storing an undecodable payload would only fail later,
/// silently, at delivery time.
pub async fn upsert_setting(
    State(state): State<AppState>,
    Path(channel): Path<NotificationChannel>,
    Json(request): Json<UpsertNotificationSettingRequest>,
) -> Result<Json<DataEnvelope<NotificationSetting>>, ApiError> {
    if let Some(ref config) = request.config {
        ChannelConfig::decode(channel, config)
            .map_err(|e| ApiError::Validation(e.to_string()))?;
    }

    let patch = NotificationSettingPatch {
        is_enabled: request.is_enabled,
        config: request.config,
        notify_on_new_feedback: request.notify_on_new_feedback,
        notify_on_urgent: request.notify_on_urgent,
        notify_on_clarification_response: request.notify_on_clarification_response,
        notify_daily_digest: request.notify_daily_digest,
    };

    let repo = NotificationSettingRepository::new(state.pool.clone());
    let entity = repo.upsert(channel.into(), &patch).await?;

    Ok(Json(DataEnvelope::new(entity.into())))
}

/// Request payload for the Telegram connectivity test.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TelegramTestRequest {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

/// `POST /api/settings/notifications/telegram/test` - send a live test
/// message to verify the bot token and chat id.
pub async fn test_telegram(
    State(state): State<AppState>,
    Json(request): Json<TelegramTestRequest>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let (success, message) = state
        .notifier
        .test_telegram(&request.bot_token, &request.chat_id)
        .await;

    Ok(Json(MessageEnvelope { success, message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_test_request_defaults() {
        let request: TelegramTestRequest = serde_json::from_str("{}").unwrap();
        assert!(request.bot_token.is_empty());
        assert!(request.chat_id.is_empty());
    }

    #[test]
    fn test_telegram_test_request_camel_case() {
        let request: TelegramTestRequest =
            serde_json::from_str(r#"{"botToken": "12345:abc", "chatId": "-100"}"#).unwrap();
        assert_eq!(request.bot_token, "12345:abc");
        assert_eq!(request.chat_id, "-100");
    }
}
