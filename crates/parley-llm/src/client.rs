//! Chat client trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::{ChatMessage, Result, TokenUsage, ToolCallRequest};

/// One model invocation: transcript, sampling parameters, optional tools
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Full conversation in wire order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: u32,
    /// Tool schemas advertised to the model, if any
    pub tools: Option<Vec<Value>>,
}

/// The model's reply to one invocation
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Plain text content, absent when the reply only carries tool calls
    pub content: Option<String>,
    /// Tool invocations requested by the model, in request order
    pub tool_calls: Vec<ToolCallRequest>,
    /// Token usage for this invocation
    pub usage: TokenUsage,
    /// Provider finish reason ("stop", "tool_calls", ...)
    pub finish_reason: Option<String>,
}

impl ChatReply {
    /// Whether the model asked for tools instead of answering
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Trait for chat-completion providers
///
/// The orchestrator only depends on this contract; the concrete wire
/// format lives entirely behind it.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one request and wait for the complete reply
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply>;

    /// Model identifier this client invokes
    fn model(&self) -> &str;
}
