//! Request/response models

use chrono::{DateTime, Utc};
use parley_agent::ToolCallRecord;
use parley_llm::TokenUsage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/v1/ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question to ask the agent
    pub question: String,

    /// Session to continue; a new one is created when absent
    pub session_id: Option<String>,

    /// Sampling temperature override (0.0 to 2.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in the response
    pub max_tokens: Option<u32>,

    /// System prompt applied when a new session is created
    pub system_prompt: Option<String>,

    /// Enable tool calling (default true)
    #[serde(default = "default_enable_tools")]
    pub enable_tools: bool,

    /// Specific tools to enable (all when absent)
    pub tool_names: Option<Vec<String>>,
}

fn default_enable_tools() -> bool {
    true
}

/// Body of a successful ask
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub session_id: String,
    pub model: String,
    pub usage: TokenUsage,
    pub tool_calls: Vec<ToolCallRecord>,
    pub timestamp: DateTime<Utc>,
}

/// Body of a successful session delete
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub session_id: String,
}

/// Health check body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
}

/// One registered tool, as listed by `GET /api/v1/tools`
#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: Value,
}

/// Body of `GET /api/v1/tools`
#[derive(Debug, Serialize)]
pub struct ToolsListResponse {
    pub tools: Vec<ToolInfo>,
    pub count: usize,
}
