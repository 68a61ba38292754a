//! HTTP route handlers.

use serde::Serialize;
use shared::pagination::PageMeta;

pub mod branding;
pub mod categories;
pub mod feedback;
pub mod health;
pub mod moderation;
pub mod notifications;
pub mod questions;
pub mod tags;
pub mod track;
pub mod webhooks;

/// Standard success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// List envelope with pagination metadata.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> ListEnvelope<T> {
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}

/// Envelope for operations that only report a message.
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}
