//! Notification channel settings.
//!
//! One row per channel type. The channel config arrives as an opaque JSON
//! payload and is decoded at the boundary into a tagged union, one variant
//! per channel, so downstream code never touches loose maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Supported notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Slack,
    Telegram,
    Webhook,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Slack => "slack",
            NotificationChannel::Telegram => "telegram",
            NotificationChannel::Webhook => "webhook",
        }
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain events that can trigger notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    NewFeedback,
    UrgentFeedback,
    ClarificationResponse,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEvent::NewFeedback => "new_feedback",
            NotificationEvent::UrgentFeedback => "urgent_feedback",
            NotificationEvent::ClarificationResponse => "clarification_response",
        }
    }
}

impl std::fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel configuration, decoded from the stored JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelConfig {
    Telegram { bot_token: String, chat_id: String },
    Slack { webhook_url: String },
    Webhook { url: String },
    Email { recipient: Option<String> },
}

/// Raw field shapes for config decoding, one per channel.
#[derive(Debug, Deserialize)]
struct TelegramConfigRaw {
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct SlackConfigRaw {
    webhook_url: String,
}

#[derive(Debug, Deserialize)]
struct WebhookConfigRaw {
    url: String,
}

#[derive(Debug, Deserialize)]
struct EmailConfigRaw {
    #[serde(default)]
    recipient: Option<String>,
}

/// Error decoding a stored channel config payload.
#[derive(Debug, Error)]
#[error("invalid {channel} config: {reason}")]
pub struct ConfigDecodeError {
    pub channel: NotificationChannel,
    pub reason: String,
}

impl ChannelConfig {
    /// Decodes the opaque JSON payload stored for `channel`.
    pub fn decode(
        channel: NotificationChannel,
        config: &serde_json::Value,
    ) -> Result<Self, ConfigDecodeError> {
        let fail = |e: serde_json::Error| ConfigDecodeError {
            channel,
            reason: e.to_string(),
        };
        match channel {
            NotificationChannel::Telegram => {
                let raw: TelegramConfigRaw =
                    serde_json::from_value(config.clone()).map_err(fail)?;
                Ok(ChannelConfig::Telegram {
                    bot_token: raw.bot_token,
                    chat_id: raw.chat_id,
                })
            }
            NotificationChannel::Slack => {
                let raw: SlackConfigRaw = serde_json::from_value(config.clone()).map_err(fail)?;
                Ok(ChannelConfig::Slack {
                    webhook_url: raw.webhook_url,
                })
            }
            NotificationChannel::Webhook => {
                let raw: WebhookConfigRaw = serde_json::from_value(config.clone()).map_err(fail)?;
                Ok(ChannelConfig::Webhook { url: raw.url })
            }
            NotificationChannel::Email => {
                let raw: EmailConfigRaw = serde_json::from_value(config.clone()).map_err(fail)?;
                Ok(ChannelConfig::Email {
                    recipient: raw.recipient,
                })
            }
        }
    }
}

/// Settings row for one notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSetting {
    pub id: Uuid,
    pub notification_type: NotificationChannel,
    pub is_enabled: bool,
    /// Opaque channel payload; decode with [`ChannelConfig::decode`].
    pub config: serde_json::Value,
    pub notify_on_new_feedback: bool,
    pub notify_on_urgent: bool,
    pub notify_on_clarification_response: bool,
    pub notify_daily_digest: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSetting {
    /// Whether this channel subscribes to the given event.
    pub fn subscribes_to(&self, event: NotificationEvent) -> bool {
        match event {
            NotificationEvent::NewFeedback => self.notify_on_new_feedback,
            NotificationEvent::UrgentFeedback => self.notify_on_urgent,
            NotificationEvent::ClarificationResponse => self.notify_on_clarification_response,
        }
    }

    /// Decoded channel config.
    pub fn channel_config(&self) -> Result<ChannelConfig, ConfigDecodeError> {
        ChannelConfig::decode(self.notification_type, &self.config)
    }
}

/// Request payload for upserting one channel's settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertNotificationSettingRequest {
    #[serde(default)]
    pub is_enabled: Option<bool>,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
    #[serde(default)]
    pub notify_on_new_feedback: Option<bool>,
    #[serde(default)]
    pub notify_on_urgent: Option<bool>,
    #[serde(default)]
    pub notify_on_clarification_response: Option<bool>,
    #[serde(default)]
    pub notify_daily_digest: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setting(channel: NotificationChannel, config: serde_json::Value) -> NotificationSetting {
        NotificationSetting {
            id: Uuid::new_v4(),
            notification_type: channel,
            is_enabled: true,
            config,
            notify_on_new_feedback: true,
            notify_on_urgent: true,
            notify_on_clarification_response: false,
            notify_daily_digest: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_decode_telegram_config() {
        let setting = setting(
            NotificationChannel::Telegram,
            json!({"bot_token": "12345:abc", "chat_id": "-100999"}),
        );
        let config = setting.channel_config().unwrap();
        assert_eq!(
            config,
            ChannelConfig::Telegram {
                bot_token: "12345:abc".into(),
                chat_id: "-100999".into(),
            }
        );
    }

    #[test]
    fn test_decode_telegram_config_missing_field() {
        let setting = setting(
            NotificationChannel::Telegram,
            json!({"bot_token": "12345:abc"}),
        );
        let err = setting.channel_config().unwrap_err();
        assert_eq!(err.channel, NotificationChannel::Telegram);
    }

    #[test]
    fn test_decode_slack_config() {
        let setting = setting(
            NotificationChannel::Slack,
            json!({"webhook_url": "https://hooks.slack.com/services/T/B/x"}),
        );
        assert!(matches!(
            setting.channel_config().unwrap(),
            ChannelConfig::Slack { ref webhook_url } if webhook_url.starts_with("https://hooks")
        ));
    }

    #[test]
    fn test_decode_webhook_config() {
        let setting = setting(NotificationChannel::Webhook, json!({"url": "https://x.dev"}));
        assert!(matches!(
            setting.channel_config().unwrap(),
            ChannelConfig::Webhook { ref url } if url == "https://x.dev"
        ));
    }

    #[test]
    fn test_decode_email_config_optional_recipient() {
        let setting = setting(NotificationChannel::Email, json!({}));
        assert!(matches!(
            setting.channel_config().unwrap(),
            ChannelConfig::Email { recipient: None }
        ));
    }

    #[test]
    fn test_subscribes_to() {
        let setting = setting(NotificationChannel::Slack, json!({"webhook_url": "x"}));
        assert!(setting.subscribes_to(NotificationEvent::NewFeedback));
        assert!(setting.subscribes_to(NotificationEvent::UrgentFeedback));
        assert!(!setting.subscribes_to(NotificationEvent::ClarificationResponse));
    }

    #[test]
    fn test_event_wire_names() {
        assert_eq!(NotificationEvent::NewFeedback.as_str(), "new_feedback");
        assert_eq!(
            NotificationEvent::ClarificationResponse.to_string(),
            "clarification_response"
        );
    }

    #[test]
    fn test_channel_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationChannel::Telegram).unwrap(),
            "\"telegram\""
        );
        let channel: NotificationChannel = serde_json::from_str("\"webhook\"").unwrap();
        assert_eq!(channel, NotificationChannel::Webhook);
    }
}
