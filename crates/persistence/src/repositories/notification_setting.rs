//! Notification settings repository for database operations.

use sqlx::PgPool;

use crate::entities::{NotificationChannelDb, NotificationSettingEntity};
use crate::metrics::QueryTimer;

/// Partial update for one channel's settings row.
#[derive(Debug, Clone, Default)]
pub struct NotificationSettingPatch {
    pub is_enabled: Option<bool>,
    pub config: Option<serde_json::Value>,
    pub notify_on_new_feedback: Option<bool>,
    pub notify_on_urgent: Option<bool>,
    pub notify_on_clarification_response: Option<bool>,
    pub notify_daily_digest: Option<bool>,
}

/// Repository for notification-settings database operations.
#[derive(Clone)]
pub struct NotificationSettingRepository {
    pool: PgPool,
}

impl NotificationSettingRepository {
    /// Creates a new NotificationSettingRepository with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All channel settings rows.
    pub async fn find_all(&self) -> Result<Vec<NotificationSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_all_notification_settings");
        let result = sqlx::query_as::<_, NotificationSettingEntity>(
            r#"
            SELECT * FROM notification_settings ORDER BY notification_type
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Settings for one channel type.
    pub async fn find_by_type(
        &self,
        channel: NotificationChannelDb,
    ) -> Result<Option<NotificationSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_notification_setting_by_type");
        let result = sqlx::query_as::<_, NotificationSettingEntity>(
            r#"
            SELECT * FROM notification_settings WHERE notification_type = $1
            "#,
        )
        .bind(channel)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Channels currently enabled for delivery.
    pub async fn find_enabled(&self) -> Result<Vec<NotificationSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_enabled_notification_settings");
        let result = sqlx::query_as::<_, NotificationSettingEntity>(
            r#"
            SELECT * FROM notification_settings WHERE is_enabled = TRUE
            ORDER BY notification_type
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert one channel's settings, unique on notification_type. Fields
    /// absent from the patch keep their stored (or default) values.
    pub async fn upsert(
        &self,
        channel: NotificationChannelDb,
        patch: &NotificationSettingPatch,
    ) -> Result<NotificationSettingEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_notification_setting");
        let result = sqlx::query_as::<_, NotificationSettingEntity>(
            r#"
            INSERT INTO notification_settings
                (notification_type, is_enabled, config, notify_on_new_feedback,
                 notify_on_urgent, notify_on_clarification_response, notify_daily_digest)
            VALUES ($1,
                    COALESCE($2, FALSE),
                    COALESCE($3, '{}'::jsonb),
                    COALESCE($4, TRUE),
                    COALESCE($5, TRUE),
                    COALESCE($6, TRUE),
                    COALESCE($7, FALSE))
            ON CONFLICT (notification_type) DO UPDATE SET
                is_enabled = COALESCE($2, notification_settings.is_enabled),
                config = COALESCE($3, notification_settings.config),
                notify_on_new_feedback = COALESCE($4, notification_settings.notify_on_new_feedback),
                notify_on_urgent = COALESCE($5, notification_settings.notify_on_urgent),
                notify_on_clarification_response =
                    COALESCE($6, notification_settings.notify_on_clarification_response),
                notify_daily_digest = COALESCE($7, notification_settings.notify_daily_digest),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(channel)
        .bind(patch.is_enabled)
        .bind(&patch.config)
        .bind(patch.notify_on_new_feedback)
        .bind(patch.notify_on_urgent)
        .bind(patch.notify_on_clarification_response)
        .bind(patch.notify_daily_digest)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
