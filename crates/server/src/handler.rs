//! MCP server handler implementation.
//!
//! This module defines the main server handler that owns the event caches
//! and routes tool calls to the appropriate implementations.
use crate::state::AppState;
use crate::tools::{FeedParams, MessageWebhookAddParams, cache, home_assistant, message_webhook};

use homesvc_core::message::IncomingHomeAssistantMessage;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for home-services.
#[derive(Clone)]
pub struct HomeServer {
    state: AppState,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl HomeServer {
    /// Create a new server handler around `state`.
    pub fn new(state: AppState) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    /// Store pushed webhook events.
    #[tool(description = "Store pushed webhook events (e.g. Tailscale notifications) in the in-memory feed.")]
    async fn message_webhook_add(
        &self, params: Parameters<MessageWebhookAddParams>,
    ) -> Result<CallToolResult, McpError> {
        message_webhook::add_impl(&self.state.webhook, params.0).await
    }

    #[tool(description = "Render the cached webhook events as an Atom feed (or JSON with format=json).")]
    async fn message_webhook_feed(&self, params: Parameters<FeedParams>) -> Result<CallToolResult, McpError> {
        message_webhook::feed_impl(&self.state.webhook, params.0, self.state.default_order).await
    }

    /// Store a Home Assistant notification.
    #[tool(description = "Store a Home Assistant notification with an entity and a message.")]
    async fn home_assistant_notify(
        &self, params: Parameters<IncomingHomeAssistantMessage>,
    ) -> Result<CallToolResult, McpError> {
        home_assistant::notify_impl(&self.state.home_assistant, params.0).await
    }

    #[tool(description = "Render the cached Home Assistant notifications as an Atom feed (or JSON with format=json).")]
    async fn home_assistant_feed(&self, params: Parameters<FeedParams>) -> Result<CallToolResult, McpError> {
        home_assistant::feed_impl(&self.state.home_assistant, params.0, self.state.default_order).await
    }

    #[tool(description = "Report entry counts, capacities and eviction totals of the event caches.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        cache::stats_impl(&self.state).await
    }
}

impl ServerHandler for HomeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "home-services".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
