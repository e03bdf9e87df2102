//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::{
    client::{ChatClient, ChatReply, ChatRequest},
    error::{LlmError, Result},
    types::{ChatMessage, TokenUsage, ToolCallPayload},
};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat completions API (or any compatible endpoint)
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_key` - provider API key, must be non-empty
    /// * `model` - model identifier, e.g. "gpt-4-turbo-preview"
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::config("API key cannot be empty"));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        })
    }

    /// Point the client at a compatible non-default endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue the request, retrying transient failures with backoff
    async fn make_request(&self, request_body: &CompletionsRequest) -> Result<CompletionsResponse> {
        let operation = || async {
            let response = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .timeout(self.timeout)
                .json(request_body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        backoff::Error::Permanent(LlmError::Timeout)
                    } else {
                        backoff::Error::Transient {
                            err: LlmError::Http(e),
                            retry_after: None,
                        }
                    }
                })?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs: Option<u64> = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());

                return Err(backoff::Error::Transient {
                    err: LlmError::RateLimitExceeded(retry_after_secs),
                    retry_after: retry_after_secs.map(Duration::from_secs),
                });
            }

            if status.is_server_error() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(backoff::Error::Transient {
                    err: LlmError::api(format!("Server error: {}", error_text)),
                    retry_after: None,
                });
            }

            if status.is_client_error() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(backoff::Error::Permanent(LlmError::api(format!(
                    "Client error ({}): {}",
                    status, error_text
                ))));
            }

            response
                .json::<CompletionsResponse>()
                .await
                .map_err(|e| backoff::Error::Permanent(LlmError::parse(e.to_string())))
        };

        let backoff_config = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff_config, operation).await
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply> {
        let has_tools = request.tools.is_some();
        let body = CompletionsRequest {
            model: self.model.clone(),
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            tools: request.tools,
            tool_choice: has_tools.then(|| "auto".to_string()),
        };

        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            tools = has_tools,
            "Sending chat completion request"
        );

        let response = self.make_request(&body).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::parse("No choices in response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .iter()
            .map(ToolCallPayload::decode)
            .collect();

        Ok(ChatReply {
            content: choice.message.content,
            tool_calls,
            usage: response.usage.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct CompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    choices: Vec<CompletionsChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionsChoice {
    message: CompletionsMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionsMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallPayload>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("test-key", "gpt-4-turbo-preview").unwrap();
        assert_eq!(client.model(), "gpt-4-turbo-preview");
        assert_eq!(client.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let client = OpenAiClient::new("", "gpt-4");
        assert!(matches!(client, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_with_base_url_and_timeout() {
        let client = OpenAiClient::new("test-key", "gpt-4")
            .unwrap()
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_request_serialization_omits_absent_tools() {
        let body = CompletionsRequest {
            model: "gpt-4".to_string(),
            messages: vec![ChatMessage::text("user", "Hello")],
            temperature: 0.7,
            max_tokens: 100,
            tools: None,
            tool_choice: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
        assert_eq!(value["messages"][0]["content"], "Hello");
    }

    #[test]
    fn test_response_with_tool_calls_parses() {
        let raw = json!({
            "model": "gpt-4",
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "calculate",
                            "arguments": "{\"operation\": \"add\", \"a\": 5, \"b\": 3}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        });

        let response: CompletionsResponse = serde_json::from_value(raw).unwrap();
        let choice = &response.choices[0];

        assert!(choice.message.content.is_none());
        let calls = choice.message.tool_calls.as_ref().unwrap();
        let decoded = calls[0].decode();
        assert_eq!(decoded.name, "calculate");
        assert_eq!(decoded.arguments["a"], 5);
        assert_eq!(response.usage.unwrap().total_tokens, 20);
    }

    #[test]
    fn test_plain_text_response_parses() {
        let raw = json!({
            "choices": [{
                "message": {"content": "The answer is 8."},
                "finish_reason": "stop"
            }]
        });

        let response: CompletionsResponse = serde_json::from_value(raw).unwrap();
        let choice = &response.choices[0];
        assert_eq!(choice.message.content.as_deref(), Some("The answer is 8."));
        assert!(choice.message.tool_calls.is_none());
        assert!(response.usage.is_none());
    }
}
