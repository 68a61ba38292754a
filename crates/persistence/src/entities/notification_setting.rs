//! Notification setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{NotificationChannel, NotificationSetting};

/// Database representation of `notification_channel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "notification_channel", rename_all = "lowercase")]
pub enum NotificationChannelDb {
    Email,
    Slack,
    Telegram,
    Webhook,
}

impl From<NotificationChannelDb> for NotificationChannel {
    fn from(db: NotificationChannelDb) -> Self {
        match db {
            NotificationChannelDb::Email => NotificationChannel::Email,
            NotificationChannelDb::Slack => NotificationChannel::Slack,
            NotificationChannelDb::Telegram => NotificationChannel::Telegram,
            NotificationChannelDb::Webhook => NotificationChannel::Webhook,
        }
    }
}

impl From<NotificationChannel> for NotificationChannelDb {
    fn from(channel: NotificationChannel) -> Self {
        match channel {
            NotificationChannel::Email => NotificationChannelDb::Email,
            NotificationChannel::Slack => NotificationChannelDb::Slack,
            NotificationChannel::Telegram => NotificationChannelDb::Telegram,
            NotificationChannel::Webhook => NotificationChannelDb::Webhook,
        }
    }
}

/// Database row mapping for the notification_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationSettingEntity {
    pub id: Uuid,
    pub notification_type: NotificationChannelDb,
    pub is_enabled: bool,
    pub config: serde_json::Value,
    pub notify_on_new_feedback: bool,
    pub notify_on_urgent: bool,
    pub notify_on_clarification_response: bool,
    pub notify_daily_digest: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationSettingEntity> for NotificationSetting {
    fn from(entity: NotificationSettingEntity) -> Self {
        Self {
            id: entity.id,
            notification_type: entity.notification_type.into(),
            is_enabled: entity.is_enabled,
            config: entity.config,
            notify_on_new_feedback: entity.notify_on_new_feedback,
            notify_on_urgent: entity.notify_on_urgent,
            notify_on_clarification_response: entity.notify_on_clarification_response,
            notify_daily_digest: entity.notify_daily_digest,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversion_preserves_config_payload() {
        let entity = NotificationSettingEntity {
            id: Uuid::new_v4(),
            notification_type: NotificationChannelDb::Telegram,
            is_enabled: true,
            config: json!({"bot_token": "12345:abc", "chat_id": "-100999"}),
            notify_on_new_feedback: true,
            notify_on_urgent: true,
            notify_on_clarification_response: true,
            notify_daily_digest: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let setting: NotificationSetting = entity.into();
        assert_eq!(setting.notification_type, NotificationChannel::Telegram);
        assert!(setting.channel_config().is_ok());
    }

    #[test]
    fn test_channel_round_trips() {
        for channel in [
            NotificationChannel::Email,
            NotificationChannel::Slack,
            NotificationChannel::Telegram,
            NotificationChannel::Webhook,
        ] {
            let db: NotificationChannelDb = channel.into();
            assert_eq!(NotificationChannel::from(db), channel);
        }
    }
}
