//! Error types for tool operations

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that can occur during tool dispatch
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Requested tool is not registered
    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(tool_name: S) -> Self {
        Self::NotFound(tool_name.into())
    }
}
