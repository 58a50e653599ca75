//! Records pushed into the event caches.
//!
//! Inbound payloads are decoded into the `Incoming*` types, then stamped with
//! an arrival time (and an identifier where the feed needs one) before they
//! are cached.

use chrono::{DateTime, Utc};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::feed::FeedItem;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of identifiers generated for webhook messages.
pub const MESSAGE_ID_LEN: usize = 10;

/// Random identifier of `len` ASCII letters.
pub fn random_id(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect()
}

/// Device details attached to a webhook event (Tailscale shape).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub managed_by: Option<String>,
    #[serde(default, rename = "nodeID")]
    pub node_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One inbound webhook event as posted by the sender.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IncomingWebhookMessage {
    #[serde(default)]
    pub data: Option<WebhookData>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tailnet: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
}

/// A cached webhook message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WebhookMessage {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub id: String,
}

impl WebhookMessage {
    /// Stamp an inbound event with arrival time `now` and a fresh id.
    pub fn received(incoming: IncomingWebhookMessage, now: DateTime<Utc>) -> Self {
        Self { timestamp: now, message: incoming.message, id: random_id(MESSAGE_ID_LEN) }
    }
}

impl FeedItem for WebhookMessage {
    fn title(&self) -> String {
        self.message.clone()
    }

    fn created(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

/// Notification body sent by a Home Assistant `rest_command`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IncomingHomeAssistantMessage {
    /// Entity the notification is about.
    #[serde(default)]
    pub entity: String,
    /// Free-form notification text.
    #[serde(default)]
    pub message: String,
}

impl IncomingHomeAssistantMessage {
    pub fn is_empty(&self) -> bool {
        self.entity.trim().is_empty() && self.message.trim().is_empty()
    }
}

/// A cached Home Assistant notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HomeAssistantMessage {
    pub entity: String,
    pub message: String,
    pub added: DateTime<Utc>,
}

impl HomeAssistantMessage {
    pub fn received(incoming: IncomingHomeAssistantMessage, now: DateTime<Utc>) -> Self {
        Self { entity: incoming.entity, message: incoming.message, added: now }
    }
}

impl FeedItem for HomeAssistantMessage {
    fn title(&self) -> String {
        format!("{} / {}", self.entity, self.message)
    }

    fn created(&self) -> DateTime<Utc> {
        self.added
    }
}
