//! Error types for the orchestration loop

use parley_llm::LlmError;

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors surfaced by the orchestrator
///
/// Tool lookup misses and tool faults never appear here: they are absorbed
/// into the conversation transcript as structured error results.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The model could not be reached on the first round of a request
    #[error("Model unavailable: {0}")]
    Model(#[from] LlmError),

    /// The orchestrator was built with invalid settings
    #[error("Orchestrator configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = AgentError::config("client not set");
        assert!(matches!(err, AgentError::Configuration(_)));
        assert!(err.to_string().contains("client not set"));
    }

    #[test]
    fn test_model_error_wraps_llm_error() {
        let err = AgentError::from(LlmError::Timeout);
        assert!(matches!(err, AgentError::Model(LlmError::Timeout)));
    }
}
