//! Error types for chat client operations

/// Result type for chat client operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to a model provider
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error: {0}")]
    Api(String),

    /// Failed to interpret the API response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after: {0:?}")]
    RateLimitExceeded(Option<u64>),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl LlmError {
    /// Create an API error
    pub fn api<S: Into<String>>(msg: S) -> Self {
        Self::Api(msg.into())
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Check if the error is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::RateLimitExceeded(_) | Self::Timeout
        )
    }
}
