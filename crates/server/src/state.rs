//! Shared state owned by the server handler.
//!
//! One cache per feature, created once at startup from `AppConfig` and
//! shared by handle into every tool call.

use std::sync::Arc;

use homesvc_core::{AppConfig, BoundedEventCache, Error, FeedOrder, HomeAssistantMessage, WebhookMessage};

/// Caches and defaults shared by all tool handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub webhook: Arc<BoundedEventCache<WebhookMessage>>,
    pub home_assistant: Arc<BoundedEventCache<HomeAssistantMessage>>,
    pub default_order: FeedOrder,
}

impl AppState {
    /// Build the caches described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if a configured capacity is 0.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let webhook = BoundedEventCache::with_name("message_webhook", config.message_webhook_capacity)?;
        let home_assistant = BoundedEventCache::with_name("home_assistant", config.home_assistant_capacity)?;

        Ok(Self {
            webhook: Arc::new(webhook),
            home_assistant: Arc::new(home_assistant),
            default_order: config.default_feed_order,
        })
    }
}
