//! In-memory ring cache for pushed events.
//!
//! This module provides a bounded, insertion-ordered cache shared between
//! the ingest and feed handlers. It supports:
//!
//! - Fixed capacity chosen at construction
//! - Eviction of the oldest entry once full
//! - Safe concurrent insertion with consistent snapshots

pub mod ring;
pub mod stats;

pub use crate::Error;

pub use ring::BoundedEventCache;
pub use stats::CacheStats;
