//! Advisory webhook registry and event fan-out.
//!
//! The registry is process-lifetime, in-memory state; registrations are
//! lost on restart. Deliveries are fire-and-forget with per-endpoint
//! error isolation, and payloads are signed with HMAC-SHA256 over the
//! JSON body when an API secret is configured.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;
use std::sync::RwLock;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Delivery timeout per endpoint.
const WEBHOOK_TIMEOUT_SECS: u64 = 5;

/// Header carrying the event name.
pub const WEBHOOK_EVENT_HEADER: &str = "X-Webhook-Event";

/// Header carrying the hex HMAC-SHA256 signature of the body.
pub const WEBHOOK_SIGNATURE_HEADER: &str = "X-Webhook-Signature";

type HmacSha256 = Hmac<Sha256>;

/// Lifecycle events broadcast to registered endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEventType {
    FeedbackSubmitted,
    FeedbackUpdated,
    ClarificationRequested,
    ClarificationResponded,
}

impl WebhookEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventType::FeedbackSubmitted => "feedback.submitted",
            WebhookEventType::FeedbackUpdated => "feedback.updated",
            WebhookEventType::ClarificationRequested => "clarification.requested",
            WebhookEventType::ClarificationResponded => "clarification.responded",
        }
    }
}

impl std::fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire payload delivered to each endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl WebhookEvent {
    pub fn new(event_type: WebhookEventType, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.as_str().to_string(),
            timestamp: Utc::now(),
            data,
        }
    }
}

/// In-memory endpoint registry plus delivery client.
pub struct WebhookFanout {
    endpoints: RwLock<Vec<String>>,
    client: Client,
    signing_key: String,
}

impl WebhookFanout {
    /// `signing_key` is the API secret; empty disables signing.
    pub fn new(signing_key: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoints: RwLock::new(Vec::new()),
            client,
            signing_key: signing_key.to_string(),
        }
    }

    /// Register a delivery URL. Returns false when it was already present.
    pub fn register(&self, url: &str) -> bool {
        let mut endpoints = self.endpoints.write().unwrap();
        if endpoints.iter().any(|e| e == url) {
            false
        } else {
            endpoints.push(url.to_string());
            true
        }
    }

    /// Snapshot of registered URLs.
    pub fn list(&self) -> Vec<String> {
        self.endpoints.read().unwrap().clone()
    }

    /// Deliver `event` to every registered endpoint concurrently,
    /// settling all attempts and logging failures per endpoint.
    pub async fn fan_out(&self, event: WebhookEvent) {
        let endpoints = self.list();
        if endpoints.is_empty() {
            return;
        }

        let body = match serde_json::to_string(&event) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to serialize webhook event: {}", e);
                return;
            }
        };
        let signature = sign_payload(&body, &self.signing_key);

        let mut tasks = JoinSet::new();
        for url in endpoints {
            let client = self.client.clone();
            let body = body.clone();
            let signature = signature.clone();
            let event_type = event.event_type.clone();
            tasks.spawn(async move {
                let mut request = client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .header(WEBHOOK_EVENT_HEADER, &event_type)
                    .body(body);
                if let Some(signature) = signature {
                    request = request.header(WEBHOOK_SIGNATURE_HEADER, signature);
                }

                match request.send().await {
                    Ok(response) if response.status().is_success() => {
                        debug!(url = %url, event = %event_type, "Webhook delivered");
                    }
                    Ok(response) => {
                        warn!(
                            url = %url,
                            status = response.status().as_u16(),
                            "Webhook endpoint returned an error status"
                        );
                    }
                    Err(e) => {
                        warn!(url = %url, "Failed to deliver webhook: {}", e);
                    }
                }
            });
        }

        while tasks.join_next().await.is_some() {}
    }

    /// Fire-and-forget fan-out from a request handler.
    pub fn fan_out_in_background(self: std::sync::Arc<Self>, event: WebhookEvent) {
        tokio::spawn(async move {
            self.fan_out(event).await;
        });
    }
}

/// Hex HMAC-SHA256 of `body`, or `None` when no key is configured.
fn sign_payload(body: &str, key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).ok()?;
    mac.update(body.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}
