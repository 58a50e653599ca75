//! Core types and shared functionality for home-services.
//!
//! This crate provides:
//! - Bounded in-memory event cache
//! - Atom and JSON feed rendering for cached events
//! - Message record types
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod message;

pub use cache::{BoundedEventCache, CacheStats};
pub use config::AppConfig;
pub use error::Error;
pub use feed::{Feed, FeedFormat, FeedItem, FeedOrder};
pub use message::{HomeAssistantMessage, WebhookMessage};
