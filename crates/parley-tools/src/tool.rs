//! Tool trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolSchema;

/// Outcome of a tool execution
///
/// A tool never fails the request it runs in: every fault is captured here
/// and fed back to the model as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the execution succeeded
    pub success: bool,

    /// Result data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutput {
    /// Create a successful output
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error output
    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// The value recorded in the transcript: the data itself on success,
    /// `{"error": message}` on failure.
    pub fn payload(&self) -> Value {
        if self.success {
            self.data.clone().unwrap_or(Value::Null)
        } else {
            serde_json::json!({
                "error": self.error.clone().unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

/// Trait for tools the model can invoke
///
/// Implementations own their side effects entirely; the orchestrator
/// treats every tool as a black box with this contract.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to request this tool
    fn name(&self) -> &str;

    /// Description included in the schema advertised to the model
    fn description(&self) -> &str;

    /// Declarative parameter schema
    fn schema(&self) -> ToolSchema;

    /// Execute with the decoded arguments object.
    ///
    /// Must not panic; invalid arguments and internal faults are returned
    /// as [`ToolOutput::error`].
    async fn execute(&self, args: Value) -> ToolOutput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_output() {
        let output = ToolOutput::success(json!({"answer": 42}));
        assert!(output.success);
        assert_eq!(output.payload()["answer"], 42);
    }

    #[test]
    fn test_error_output_payload() {
        let output = ToolOutput::error("something went wrong");
        assert!(!output.success);
        assert_eq!(output.payload(), json!({"error": "something went wrong"}));
    }

    #[test]
    fn test_output_serialization() {
        let output = ToolOutput::success(json!({"value": 123}));
        let encoded = serde_json::to_string(&output).unwrap();
        let decoded: ToolOutput = serde_json::from_str(&encoded).unwrap();

        assert!(decoded.success);
        assert!(decoded.error.is_none());
    }
}
