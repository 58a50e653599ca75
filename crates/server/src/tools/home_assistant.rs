//! home_assistant tools.
//!
//! Notifications arrive from a Home Assistant `rest_command` and are kept in
//! memory for the notifications feed.
//! See <https://www.home-assistant.io/integrations/rest_command>.

use chrono::Utc;
use homesvc_core::{
    BoundedEventCache, Error, Feed, FeedFormat, FeedOrder, HomeAssistantMessage, message::IncomingHomeAssistantMessage,
};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::message_webhook::FeedParams;

pub const FEED_TITLE: &str = "Home-assistant / notifications";
pub const FEED_DESCRIPTION: &str = "All notifications coming from Home Assistant";

/// Output from the home_assistant_notify tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HomeAssistantNotifyOutput {
    pub msg: String,
}

/// Implementation of the home_assistant_notify tool.
pub async fn notify_impl(
    cache: &BoundedEventCache<HomeAssistantMessage>, params: IncomingHomeAssistantMessage,
) -> Result<CallToolResult, McpError> {
    if params.is_empty() {
        tracing::warn!("rejected empty Home Assistant notification");
        return Err(Error::InvalidInput("entity and message cannot both be empty".into()).into());
    }

    tracing::debug!(entity = %params.entity, message = %params.message, "incoming message from Home Assistant");
    cache.add(HomeAssistantMessage::received(params, Utc::now()));

    let output = HomeAssistantNotifyOutput { msg: "all fine!".into() };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Render(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Implementation of the home_assistant_feed tool.
pub async fn feed_impl(
    cache: &BoundedEventCache<HomeAssistantMessage>, params: FeedParams, default_order: FeedOrder,
) -> Result<CallToolResult, McpError> {
    let order = params.order.unwrap_or(default_order);
    let items = order.snapshot(cache);
    tracing::debug!(items = items.len(), ?order, "rendering Home Assistant feed");

    let feed = Feed::from_items(FEED_TITLE, FEED_DESCRIPTION, &items, Utc::now());

    let body = feed.render(params.format.unwrap_or_default())?;

    Ok(CallToolResult::success(vec![Content::text(body)]))
}
