//! MCP tool implementations.
//!
//! This module contains all tools exposed by the home-services server.

pub mod cache;
pub mod home_assistant;
pub mod message_webhook;

pub use message_webhook::{FeedParams, MessageWebhookAddParams};
