//! Common types for chat interactions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions
    System,
    /// End-user message
    User,
    /// Model response
    Assistant,
    /// Result of an executed tool call
    Tool,
}

impl MessageRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        }
    }
}

/// A tool invocation requested by the model, with decoded arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Provider-assigned call id, echoed back on the result message
    pub id: String,
    /// Name of the requested tool
    pub name: String,
    /// Decoded arguments object
    pub arguments: Value,
}

impl ToolCallRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Project into the wire shape (arguments re-encoded as a JSON string)
    pub fn to_payload(&self) -> ToolCallPayload {
        ToolCallPayload {
            id: self.id.clone(),
            call_type: "function".to_string(),
            function: FunctionPayload {
                name: self.name.clone(),
                arguments: self.arguments.to_string(),
            },
        }
    }
}

/// Tool call as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionPayload,
}

/// Function name/arguments pair inside a wire tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPayload {
    pub name: String,
    /// JSON-encoded arguments, exactly as the provider sent them
    pub arguments: String,
}

impl ToolCallPayload {
    /// Decode into a [`ToolCallRequest`].
    ///
    /// Models occasionally emit malformed argument JSON; that decodes to an
    /// empty object so the tool reports the missing parameters itself
    /// instead of the whole request failing.
    pub fn decode(&self) -> ToolCallRequest {
        let arguments = serde_json::from_str(&self.function.arguments)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        ToolCallRequest {
            id: self.id.clone(),
            name: self.function.name.clone(),
            arguments,
        }
    }
}

/// A message in the exact shape the provider expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Plain role/content message
    pub fn text(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Fold another round's usage into this accumulator
    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&MessageRole::Tool).unwrap(), "\"tool\"");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_payload_round_trip() {
        let request = ToolCallRequest::new("call_1", "get_weather", json!({"location": "Tokyo"}));
        let payload = request.to_payload();

        assert_eq!(payload.call_type, "function");
        assert_eq!(payload.function.name, "get_weather");

        let decoded = payload.decode();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_malformed_arguments_decode_to_empty_object() {
        let payload = ToolCallPayload {
            id: "call_1".to_string(),
            call_type: "function".to_string(),
            function: FunctionPayload {
                name: "calculate".to_string(),
                arguments: "not json {".to_string(),
            },
        };

        let decoded = payload.decode();
        assert_eq!(decoded.arguments, json!({}));
    }

    #[test]
    fn test_chat_message_skips_absent_fields() {
        let msg = ChatMessage::text("user", "Hello");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json, json!({"role": "user", "content": "Hello"}));
    }

    #[test]
    fn test_usage_accumulation() {
        let mut total = TokenUsage::default();
        total.accumulate(&TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
        });
        total.accumulate(&TokenUsage {
            prompt_tokens: 5,
            completion_tokens: 5,
            total_tokens: 10,
        });

        assert_eq!(total.prompt_tokens, 15);
        assert_eq!(total.completion_tokens, 25);
        assert_eq!(total.total_tokens, 40);
    }
}
