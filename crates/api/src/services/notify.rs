//! Notification dispatcher.
//!
//! Fans a domain event out to every enabled channel. Channels run
//! concurrently and each one swallows and logs its own delivery errors;
//! nothing here can fail the operation that triggered the event.

use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use domain::models::{
    ChannelConfig, FeedbackType, NotificationEvent, NotificationSetting, Urgency,
};
use persistence::repositories::NotificationSettingRepository;

use crate::middleware::metrics::record_notification_delivery;

/// Delivery timeout per outbound call.
const NOTIFY_TIMEOUT_SECS: u64 = 5;

/// Event payload passed to every channel.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_type: Option<FeedbackType>,
}

/// Dispatches domain events to configured notification channels.
#[derive(Clone)]
pub struct Notifier {
    pool: PgPool,
    client: Client,
    dashboard_url: String,
}

impl Notifier {
    pub fn new(pool: PgPool, base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            pool,
            client,
            dashboard_url: format!("{}/admin", base_url.trim_end_matches('/')),
        }
    }

    /// Fire-and-forget dispatch from a request handler.
    pub fn dispatch_in_background(&self, event: NotificationEvent, data: NotificationData) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.dispatch(event, data).await;
        });
    }

    /// Deliver `event` to every subscribed channel. Urgent new feedback
    /// additionally triggers the urgent-feedback toggle per channel.
    pub async fn dispatch(&self, event: NotificationEvent, data: NotificationData) {
        let repo = NotificationSettingRepository::new(self.pool.clone());
        let settings = match repo.find_enabled().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load notification settings: {}", e);
                return;
            }
        };

        let is_urgent = event == NotificationEvent::NewFeedback
            && data.urgency.map(|u| u.is_urgent()).unwrap_or(false);

        let mut tasks = JoinSet::new();
        for setting in settings {
            let setting: NotificationSetting = setting.into();

            if is_urgent && setting.subscribes_to(NotificationEvent::UrgentFeedback) {
                let notifier = self.clone();
                let setting = setting.clone();
                let data = data.clone();
                tasks.spawn(async move {
                    notifier
                        .deliver(&setting, NotificationEvent::UrgentFeedback, &data)
                        .await;
                });
            }

            if setting.subscribes_to(event) {
                let notifier = self.clone();
                let data = data.clone();
                tasks.spawn(async move {
                    notifier.deliver(&setting, event, &data).await;
                });
            }
        }

        // Settle all deliveries; per-channel failures are already logged.
        while tasks.join_next().await.is_some() {}
    }

    /// Deliver one event to one channel, swallowing errors.
    async fn deliver(
        &self,
        setting: &NotificationSetting,
        event: NotificationEvent,
        data: &NotificationData,
    ) {
        let channel = setting.notification_type;
        let config = match setting.channel_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(channel = %channel, "Skipping notification: {}", e);
                return;
            }
        };

        let result = match config {
            ChannelConfig::Telegram { bot_token, chat_id } => {
                self.send_telegram(&bot_token, &chat_id, event, data).await
            }
            ChannelConfig::Slack { webhook_url } => {
                self.send_slack(&webhook_url, event, data).await
            }
            ChannelConfig::Webhook { url } => self.send_webhook(&url, event, data).await,
            ChannelConfig::Email { recipient } => {
                // Email delivery is a placeholder; log and move on.
                info!(
                    recipient = recipient.as_deref().unwrap_or("<unset>"),
                    event = %event,
                    subject = data.subject.as_deref().unwrap_or(""),
                    "Email notification (stub)"
                );
                Ok(())
            }
        };

        match result {
            Ok(()) => record_notification_delivery(channel.as_str(), true),
            Err(e) => {
                record_notification_delivery(channel.as_str(), false);
                warn!(channel = %channel, event = %event, "Notification delivery failed: {}", e);
            }
        }
    }

    async fn send_telegram(
        &self,
        bot_token: &str,
        chat_id: &str,
        event: NotificationEvent,
        data: &NotificationData,
    ) -> Result<(), reqwest::Error> {
        if bot_token.is_empty() || chat_id.is_empty() {
            return Ok(());
        }

        let message = self.format_telegram_message(event, data);
        self.client
            .post(format!("https://api.telegram.org/bot{bot_token}/sendMessage"))
            .json(&json!({
                "chat_id": chat_id,
                "text": message,
                "parse_mode": "Markdown",
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn format_telegram_message(&self, event: NotificationEvent, data: &NotificationData) -> String {
        let subject = data.subject.as_deref().unwrap_or("No subject");
        let category = data.category.as_deref().unwrap_or("Uncategorized");
        let feedback_type = data
            .feedback_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "unknown".into());

        match event {
            NotificationEvent::NewFeedback => format!(
                "*New Feedback Received*\n\n\
                 *Type:* {feedback_type}\n\
                 *Urgency:* {}\n\
                 *Category:* {category}\n\n\
                 *Subject:* {subject}\n\n\
                 [View in Dashboard]({})",
                data.urgency.unwrap_or_default(),
                self.dashboard_url,
            ),
            NotificationEvent::UrgentFeedback => format!(
                "*URGENT Feedback Alert*\n\n\
                 *Priority:* {}\n\
                 *Type:* {feedback_type}\n\
                 *Category:* {category}\n\n\
                 *Subject:* {subject}\n\n\
                 Requires immediate attention.\n\n\
                 [View Now]({})",
                data.urgency
                    .map(|u| u.as_str().to_uppercase())
                    .unwrap_or_else(|| "HIGH".into()),
                self.dashboard_url,
            ),
            NotificationEvent::ClarificationResponse => format!(
                "*Clarification Response Received*\n\n\
                 *Subject:* {subject}\n\n\
                 A submitter has responded to a follow-up question.\n\n\
                 [View Response]({})",
                self.dashboard_url,
            ),
        }
    }

    async fn send_slack(
        &self,
        webhook_url: &str,
        event: NotificationEvent,
        data: &NotificationData,
    ) -> Result<(), reqwest::Error> {
        if webhook_url.is_empty() {
            return Ok(());
        }

        let color = match event {
            NotificationEvent::NewFeedback => "#10b981",
            NotificationEvent::UrgentFeedback => "#ef4444",
            NotificationEvent::ClarificationResponse => "#3b82f6",
        };

        let title = event.as_str().replace('_', " ").to_uppercase();
        let payload = json!({
            "attachments": [{
                "color": color,
                "blocks": [
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": format!("*{title}*") }
                    },
                    {
                        "type": "section",
                        "fields": [
                            { "type": "mrkdwn", "text": format!("*Subject:* {}", data.subject.as_deref().unwrap_or("N/A")) },
                            { "type": "mrkdwn", "text": format!("*Category:* {}", data.category.as_deref().unwrap_or("N/A")) },
                            { "type": "mrkdwn", "text": format!("*Urgency:* {}", data.urgency.map(|u| u.to_string()).unwrap_or_else(|| "N/A".into())) },
                            { "type": "mrkdwn", "text": format!("*Type:* {}", data.feedback_type.map(|t| t.to_string()).unwrap_or_else(|| "N/A".into())) },
                        ]
                    }
                ]
            }]
        });

        self.client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn send_webhook(
        &self,
        endpoint: &str,
        event: NotificationEvent,
        data: &NotificationData,
    ) -> Result<(), reqwest::Error> {
        if endpoint.is_empty() {
            return Ok(());
        }

        self.client
            .post(endpoint)
            .header("X-Event-Type", event.as_str())
            .json(&json!({
                "event": event.as_str(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "data": data,
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Send a live Telegram test message, mapping the common failure
    /// descriptions to actionable messages for the settings screen.
    pub async fn test_telegram(&self, bot_token: &str, chat_id: &str) -> (bool, String) {
        if bot_token.trim().is_empty() {
            return (
                false,
                "Bot token is required. Get one from @BotFather on Telegram.".into(),
            );
        }
        if chat_id.trim().is_empty() {
            return (
                false,
                "Chat ID is required. Send a message to your bot first, then use @userinfobot \
                 or check the Telegram API to get your chat ID."
                    .into(),
            );
        }

        let response = self
            .client
            .post(format!(
                "https://api.telegram.org/bot{}/sendMessage",
                bot_token.trim()
            ))
            .json(&json!({
                "chat_id": chat_id.trim(),
                "text": "Test notification from the feedback portal.\n\nYour Telegram integration is working correctly!",
            }))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(_) => {
                return (
                    false,
                    "Failed to connect to Telegram API. Please check your network connection."
                        .into(),
                )
            }
        };

        #[derive(serde::Deserialize)]
        struct TelegramResult {
            ok: bool,
            description: Option<String>,
        }

        match response.json::<TelegramResult>().await {
            Ok(result) if result.ok => (true, "Test notification sent successfully!".into()),
            Ok(result) => {
                let description = result.description.unwrap_or_default();
                let message = if description.contains("chat not found") {
                    "Chat not found. Make sure you've started a conversation with the bot \
                     first by sending /start to it."
                        .to_string()
                } else if description.contains("bot was blocked") {
                    "The bot was blocked by the user. Please unblock the bot and try again."
                        .to_string()
                } else if description.contains("Unauthorized") {
                    "Invalid bot token. Please check your bot token from @BotFather.".to_string()
                } else if description.is_empty() {
                    "Failed to send test message".to_string()
                } else {
                    description
                };
                (false, message)
            }
            Err(_) => (false, "Failed to send test message".into()),
        }
    }
}
