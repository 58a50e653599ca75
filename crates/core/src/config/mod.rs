//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (HOME_SERVICES_*)
//! 2. TOML config file (if HOME_SERVICES_CONFIG_FILE set)
//! 3. Built-in defaults

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::feed::FeedOrder;

mod validation;

pub use validation::{ConfigError, MAX_CAPACITY};

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (HOME_SERVICES_*)
/// 2. TOML config file (if HOME_SERVICES_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of webhook messages kept in memory.
    ///
    /// Set via HOME_SERVICES_MESSAGE_WEBHOOK_CAPACITY environment variable.
    #[serde(default = "default_capacity")]
    pub message_webhook_capacity: usize,

    /// Number of Home Assistant notifications kept in memory.
    ///
    /// Set via HOME_SERVICES_HOME_ASSISTANT_CAPACITY environment variable.
    #[serde(default = "default_capacity")]
    pub home_assistant_capacity: usize,

    /// Feed order used when a feed request does not specify one.
    ///
    /// Set via HOME_SERVICES_DEFAULT_FEED_ORDER environment variable
    /// (`newest_first` or `oldest_first`).
    #[serde(default)]
    pub default_feed_order: FeedOrder,
}

fn default_capacity() -> usize {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            message_webhook_capacity: default_capacity(),
            home_assistant_capacity: default_capacity(),
            default_feed_order: FeedOrder::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `HOME_SERVICES_`
    /// 2. TOML file from `HOME_SERVICES_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config_file = std::env::var("HOME_SERVICES_CONFIG_FILE").ok();
        Self::from_figment(Self::figment(config_file.as_deref()))
    }

    /// Layered figment for the given optional TOML file path.
    pub fn figment(config_file: Option<&str>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(
            Env::prefixed("HOME_SERVICES_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadFailed` if extraction fails, or the
    /// validation error if a value is out of range.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.message_webhook_capacity, 100);
        assert_eq!(config.home_assistant_capacity, 100);
        assert_eq!(config.default_feed_order, FeedOrder::NewestFirst);
    }

    #[test]
    fn test_from_figment_overrides() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("home_assistant_capacity = 10\ndefault_feed_order = \"oldest_first\""));
        let config = AppConfig::from_figment(figment).unwrap();
        assert_eq!(config.home_assistant_capacity, 10);
        assert_eq!(config.message_webhook_capacity, 100);
        assert_eq!(config.default_feed_order, FeedOrder::OldestFirst);
    }

    #[test]
    fn test_from_figment_rejects_zero_capacity() {
        let figment =
            Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string("message_webhook_capacity = 0"));
        let result = AppConfig::from_figment(figment);
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "message_webhook_capacity"));
    }

    #[test]
    fn test_from_figment_bad_type() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("home_assistant_capacity = \"lots\""));
        let result = AppConfig::from_figment(figment);
        assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HOME_SERVICES_DEFAULT_FEED_ORDER", "oldest_first");
            jail.set_env("HOME_SERVICES_HOME_ASSISTANT_CAPACITY", "7");

            let config = AppConfig::from_figment(AppConfig::figment(None)).map_err(|e| e.to_string())?;
            assert_eq!(config.default_feed_order, FeedOrder::OldestFirst);
            assert_eq!(config.home_assistant_capacity, 7);
            assert_eq!(config.message_webhook_capacity, 100);
            Ok(())
        });
    }

    #[test]
    fn test_env_wins_over_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "home-services.toml",
                "message_webhook_capacity = 20\nhome_assistant_capacity = 30",
            )?;
            jail.set_env("HOME_SERVICES_CONFIG_FILE", "home-services.toml");
            jail.set_env("HOME_SERVICES_HOME_ASSISTANT_CAPACITY", "40");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.message_webhook_capacity, 20);
            assert_eq!(config.home_assistant_capacity, 40);
            Ok(())
        });
    }

    #[test]
    fn test_env_rejects_invalid_capacity() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HOME_SERVICES_MESSAGE_WEBHOOK_CAPACITY", "0");

            let result = AppConfig::from_figment(AppConfig::figment(None));
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "message_webhook_capacity"));
            Ok(())
        });
    }
}
