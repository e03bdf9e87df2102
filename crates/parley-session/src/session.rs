//! A single conversation's bounded message log

use chrono::{DateTime, Utc};
use parley_llm::{ChatMessage, MessageRole, ToolCallRequest};
use serde::{Deserialize, Serialize};

/// One entry in a conversation transcript. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message
    pub role: MessageRole,

    /// Text content; absent for assistant messages that only carry tool calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool invocations requested by an assistant message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRequest>>,

    /// Id of the call a tool-role message answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Name of the tool that produced a tool-role message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// System instructions
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(MessageRole::System, content)
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(MessageRole::User, content)
    }

    /// Plain assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(MessageRole::Assistant, content)
    }

    /// Assistant message carrying tool-call requests
    pub fn assistant_tool_calls(content: Option<String>, calls: Vec<ToolCallRequest>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content,
            tool_calls: Some(calls),
            tool_call_id: None,
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Result of one executed tool call
    pub fn tool(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: MessageRole::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            tool_name: Some(tool_name.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Caller-facing snapshot of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistory {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered, bounded message log for one conversation
///
/// The bound is enforced on every append: the oldest non-system messages
/// are evicted first, and system messages are never evicted.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: String,
    messages: Vec<Message>,
    max_history: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Create an empty session, optionally seeded with a system message
    pub fn new(
        id: impl Into<String>,
        max_history: usize,
        system_prompt: Option<&str>,
    ) -> Self {
        let now = Utc::now();
        let mut session = Self {
            id: id.into(),
            messages: Vec::new(),
            max_history,
            created_at: now,
            updated_at: now,
        };

        if let Some(prompt) = system_prompt {
            session.push(Message::system(prompt));
        }

        session
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages currently held
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, then enforce the history bound
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
        self.trim();
    }

    /// Append a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Message::user(content));
    }

    /// Append a plain assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Message::assistant(content));
    }

    /// Evict the oldest non-system messages until the bound holds.
    ///
    /// System messages keep their place at the front of the log.
    fn trim(&mut self) {
        if self.messages.len() <= self.max_history {
            return;
        }

        let system: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .cloned()
            .collect();

        let mut others: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .cloned()
            .collect();

        let keep = self.max_history.saturating_sub(system.len());
        let tail = others.split_off(others.len().saturating_sub(keep));

        self.messages = system;
        self.messages.extend(tail);
    }

    /// Project the transcript into the wire shape the provider expects.
    ///
    /// Pure projection: no mutation, no filtering beyond what trimming
    /// already removed.
    pub fn to_model_format(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|msg| ChatMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
                tool_calls: msg
                    .tool_calls
                    .as_ref()
                    .map(|calls| calls.iter().map(ToolCallRequest::to_payload).collect()),
                tool_call_id: msg.tool_call_id.clone(),
                name: msg.tool_name.clone(),
            })
            .collect()
    }

    /// Read-only snapshot for inspection endpoints
    pub fn to_history_view(&self) -> SessionHistory {
        SessionHistory {
            session_id: self.id.clone(),
            messages: self.messages.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// The last assistant message that carries text, if any
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::Assistant)
            .find_map(|m| m.content.as_deref())
    }
}
