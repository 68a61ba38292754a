//! Outbound-call services: AI analysis, notification delivery, advisory
//! webhook fan-out.

pub mod ai;
pub mod notify;
pub mod webhook_events;

pub use ai::GeminiAnalyzer;
pub use notify::{NotificationData, Notifier};
pub use webhook_events::{WebhookEvent, WebhookEventType, WebhookFanout};
