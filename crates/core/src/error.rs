//! Unified error types for home-services.
//!
//! The message prefixes double as stable error codes for tool callers.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::config::ConfigError;

/// Unified error types for the home-services server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid construction argument (e.g., a cache capacity of 0).
    #[error("INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),

    /// Invalid input parameters (e.g., an empty notification).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Feed or tool output could not be serialized.
    #[error("RENDER_FAILED: {0}")]
    Render(String),

    /// Configuration could not be loaded or failed validation.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidArgument(msg) => (-32602, msg.clone()),
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::Render(msg) => (-32000, msg.clone()),
            Error::Config(e) => (-32603, e.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("capacity must be at least 1".to_string());
        assert!(err.to_string().starts_with("INVALID_ARGUMENT"));
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::Render("boom".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32000);
        assert_eq!(mcp_err.message, "boom");
    }

    #[test]
    fn test_config_error_wraps() {
        let err: Error = ConfigError::LoadFailed("no file".into()).into();
        assert!(err.to_string().contains("CONFIG_ERROR"));
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32603);
    }
}
