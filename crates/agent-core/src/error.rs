//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool validation failed
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Parse error (e.g., model output that does not match the requested schema)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Whether the caller supplied a bad request (unknown tool or bad arguments)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AgentError::ToolNotFound(_) | AgentError::ToolValidation(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(msg) => format!("The AI service encountered an error: {}", msg),
            AgentError::ProviderUnavailable(_) => "The AI service is currently unavailable. Please try again.".into(),
            AgentError::ToolNotFound(name) => format!("The tool '{}' is not available.", name),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {}", msg),
            AgentError::ToolExecution(msg) => format!("Tool error: {}", msg),
            AgentError::Parse(msg) => format!("The AI service returned an unexpected format: {}", msg),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(AgentError::ToolNotFound("x".into()).is_client_error());
        assert!(AgentError::ToolValidation("x".into()).is_client_error());
        assert!(!AgentError::Parse("x".into()).is_client_error());
    }

    #[test]
    fn test_user_message() {
        let err = AgentError::ToolNotFound("Teleport".into());
        assert_eq!(err.user_message(), "The tool 'Teleport' is not available.");

        let err = AgentError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(err.user_message(), "An unexpected error occurred.");
    }
}
