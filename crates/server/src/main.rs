//! home-services server entry point.
//!
//! This is the main binary that loads configuration, creates the event caches
//! and boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use homesvc_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let state = state::AppState::from_config(&config)?;

    tracing::info!(
        message_webhook_capacity = config.message_webhook_capacity,
        home_assistant_capacity = config.home_assistant_capacity,
        default_feed_order = ?config.default_feed_order,
        "Starting home-services server on stdio transport"
    );

    let handler = handler::HomeServer::new(state);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
