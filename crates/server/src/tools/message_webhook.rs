//! message_webhook tools.
//!
//! `message_webhook_add` stores pushed webhook events (e.g. Tailscale
//! notifications) in the in-memory cache; `message_webhook_feed` renders
//! the cached events as a feed.

use chrono::Utc;
use homesvc_core::{
    BoundedEventCache, Error, Feed, FeedFormat, FeedOrder, WebhookMessage, message::IncomingWebhookMessage,
};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const FEED_TITLE: &str = "Home service / pushed webhook items";
pub const FEED_DESCRIPTION: &str = "Home service / pushed webhook items";

/// Parameters for the message_webhook_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageWebhookAddParams {
    /// Webhook events, in the order they should be stored.
    #[serde(default)]
    pub messages: Vec<IncomingWebhookMessage>,
}

/// Output from the message_webhook_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageWebhookAddOutput {
    /// Number of events stored.
    pub added: usize,
    /// Identifiers assigned to the stored events.
    pub ids: Vec<String>,
}

/// Parameters shared by the feed tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FeedParams {
    /// Entry order; falls back to the configured default.
    #[serde(default)]
    pub order: Option<FeedOrder>,

    /// Output format; Atom unless `json` is requested.
    #[serde(default)]
    pub format: Option<FeedFormat>,
}

/// Implementation of the message_webhook_add tool.
pub async fn add_impl(
    cache: &BoundedEventCache<WebhookMessage>, params: MessageWebhookAddParams,
) -> Result<CallToolResult, McpError> {
    let now = Utc::now();
    let mut ids = Vec::with_capacity(params.messages.len());

    for incoming in params.messages {
        let message = WebhookMessage::received(incoming, now);
        tracing::info!(id = %message.id, message = %message.message, "added webhook item");
        ids.push(message.id.clone());
        cache.add(message);
    }

    tracing::info!(added = ids.len(), cached = cache.count(), full = cache.is_full(), "webhook items stored");

    let output = MessageWebhookAddOutput { added: ids.len(), ids };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Render(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Implementation of the message_webhook_feed tool.
pub async fn feed_impl(
    cache: &BoundedEventCache<WebhookMessage>, params: FeedParams, default_order: FeedOrder,
) -> Result<CallToolResult, McpError> {
    let order = params.order.unwrap_or(default_order);
    let items = order.snapshot(cache);
    tracing::debug!(items = items.len(), ?order, "rendering webhook feed");

    let feed = Feed::from_items(FEED_TITLE, FEED_DESCRIPTION, &items, Utc::now());

    let body = feed.render(params.format.unwrap_or_default())?;

    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn text_of(result: &CallToolResult) -> String {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content")
            .to_string()
    }

    fn incoming(message: &str) -> IncomingWebhookMessage {
        IncomingWebhookMessage { message: message.to_string(), ..Default::default() }
    }

    #[tokio::test]
    async fn test_add_stores_each_message() {
        let cache = BoundedEventCache::new(10).unwrap();
        let params = MessageWebhookAddParams { messages: vec![incoming("one"), incoming("two")] };

        let result = add_impl(&cache, params).await.unwrap();
        let output: MessageWebhookAddOutput = serde_json::from_str(&text_of(&result)).unwrap();

        assert_eq!(output.added, 2);
        assert_eq!(cache.count(), 2);
        let stored: Vec<String> = cache.elements().into_iter().map(|m| m.id).collect();
        assert_eq!(stored, output.ids);
    }

    #[tokio::test]
    async fn test_add_empty_batch() {
        let cache = BoundedEventCache::new(10).unwrap();
        let result = add_impl(&cache, MessageWebhookAddParams { messages: vec![] }).await.unwrap();
        let output: MessageWebhookAddOutput = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(output.added, 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_add_decodes_wire_batch() {
        let params: MessageWebhookAddParams =
            serde_json::from_str(r#"{"messages": [{"message": "Node approved", "type": "nodeApproved", "version": 1}]}"#)
                .unwrap();
        let cache = BoundedEventCache::new(10).unwrap();
        add_impl(&cache, params).await.unwrap();
        assert_eq!(cache.elements()[0].message, "Node approved");
    }

    #[tokio::test]
    async fn test_feed_newest_first_by_default() {
        let cache = BoundedEventCache::new(2).unwrap();
        let params = MessageWebhookAddParams { messages: vec![incoming("a"), incoming("b"), incoming("c")] };
        add_impl(&cache, params).await.unwrap();

        let params = FeedParams { order: None, format: Some(FeedFormat::Json) };
        let result = feed_impl(&cache, params, FeedOrder::NewestFirst).await.unwrap();
        let feed: Feed = serde_json::from_str(&text_of(&result)).unwrap();

        assert_eq!(feed.title, FEED_TITLE);
        let titles: Vec<&str> = feed.items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b"]);
        assert!(feed.items.iter().all(|item| item.id.is_some()));
    }

    #[tokio::test]
    async fn test_feed_order_override() {
        let cache = BoundedEventCache::new(5).unwrap();
        let params = MessageWebhookAddParams { messages: vec![incoming("a"), incoming("b")] };
        add_impl(&cache, params).await.unwrap();

        let params = FeedParams { order: Some(FeedOrder::OldestFirst), format: Some(FeedFormat::Json) };
        let result = feed_impl(&cache, params, FeedOrder::NewestFirst).await.unwrap();
        let feed: Feed = serde_json::from_str(&text_of(&result)).unwrap();

        let titles: Vec<&str> = feed.items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_feed_defaults_to_atom() {
        let cache = BoundedEventCache::new(5).unwrap();
        let params = MessageWebhookAddParams { messages: vec![incoming("Node approved"), incoming("Node removed")] };
        let result = add_impl(&cache, params).await.unwrap();
        let output: MessageWebhookAddOutput = serde_json::from_str(&text_of(&result)).unwrap();

        let result = feed_impl(&cache, FeedParams::default(), FeedOrder::NewestFirst).await.unwrap();
        let text = text_of(&result);
        assert!(text.starts_with("<?xml"));

        let atom = atom_syndication::Feed::from_str(&text).unwrap();
        assert_eq!(atom.title().value, FEED_TITLE);
        let titles: Vec<&str> = atom.entries().iter().map(|entry| entry.title().value.as_str()).collect();
        assert_eq!(titles, vec!["Node removed", "Node approved"]);
        assert!(atom.entries()[0].id().ends_with(&output.ids[1]));
        assert!(atom.entries()[1].id().ends_with(&output.ids[0]));
    }
}
