//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest cache capacity accepted from configuration.
pub const MAX_CAPACITY: usize = 10_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn check_capacity(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid { field: field.into(), reason: "must be greater than 0".into() });
    }
    if value > MAX_CAPACITY {
        return Err(ConfigError::Invalid {
            field: field.into(),
            reason: format!("must not exceed {MAX_CAPACITY}"),
        });
    }
    Ok(())
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if either cache capacity is 0 or
    /// exceeds `MAX_CAPACITY`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_capacity("message_webhook_capacity", self.message_webhook_capacity)?;
        check_capacity("home_assistant_capacity", self.home_assistant_capacity)?;

        if self.message_webhook_capacity > 1_000 || self.home_assistant_capacity > 1_000 {
            tracing::warn!(
                message_webhook_capacity = self.message_webhook_capacity,
                home_assistant_capacity = self.home_assistant_capacity,
                "Large cache capacity configured; every feed request clones the full cache"
            );
        }

        Ok(())
    }
}
