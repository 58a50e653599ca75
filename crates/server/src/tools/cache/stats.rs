//! cache_stats tool implementation.
//!
//! Reports counters for every event cache.

use homesvc_core::{CacheStats, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Counters for one cache plus derived occupancy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheReport {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Fraction of capacity in use, between 0.0 and 1.0.
    pub fill_ratio: f64,
}

impl From<CacheStats> for CacheReport {
    fn from(stats: CacheStats) -> Self {
        Self { fill_ratio: stats.fill_ratio(), stats }
    }
}

/// Output from the cache_stats tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheStatsOutput {
    pub caches: Vec<CacheReport>,
}

/// Implementation of the cache_stats tool.
pub async fn stats_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    let output = CacheStatsOutput { caches: vec![state.webhook.stats().into(), state.home_assistant.stats().into()] };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Render(format!("Failed to serialize stats: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
