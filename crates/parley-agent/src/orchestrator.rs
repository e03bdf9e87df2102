//! The multi-round orchestration loop

use futures::future;
use parley_llm::{ChatClient, ChatRequest, TokenUsage, ToolCallRequest};
use parley_session::{Message, SessionStore, SharedSession};
use parley_tools::{ToolError, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::{error::AgentError, Result};

/// Answer returned when the loop ends without any assistant text
const FALLBACK_ANSWER: &str =
    "The assistant could not complete the request. Please try again.";

/// Settings governing one orchestrator instance
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Ceiling on model rounds within a single ask
    pub max_rounds: usize,

    /// Sampling temperature used when the request does not override it
    pub default_temperature: f32,

    /// Completion token cap used when the request does not override it
    pub default_max_tokens: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            default_temperature: 0.7,
            default_max_tokens: 1000,
        }
    }
}

/// Per-request options for [`Orchestrator::ask`]
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Session to continue; a new session is created when absent
    pub session_id: Option<String>,

    /// Sampling temperature override
    pub temperature: Option<f32>,

    /// Completion token cap override
    pub max_tokens: Option<u32>,

    /// System prompt for a newly created session
    pub system_prompt: Option<String>,

    /// Whether tools are advertised to the model at all
    pub enable_tools: bool,

    /// Restrict advertised tools to these names
    pub tool_names: Option<Vec<String>>,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            session_id: None,
            temperature: None,
            max_tokens: None,
            system_prompt: None,
            enable_tools: true,
            tool_names: None,
        }
    }
}

/// One executed tool call, as surfaced to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool_call_id: String,
    pub tool_name: String,
    pub arguments: Value,
    /// Tool output, or `{"error": message}` when the call failed
    pub result: Value,
}

/// Final result of one ask
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// The answer text (never empty; a fallback sentence when degraded)
    pub answer: String,

    /// Session the exchange was recorded under
    pub session_id: String,

    /// Token usage summed over every model invocation in the loop
    pub usage: TokenUsage,

    /// Every tool call executed during the exchange, in execution order
    pub tool_calls: Vec<ToolCallRecord>,
}

/// Drives the model/tool loop for one question at a time
pub struct Orchestrator {
    client: Arc<dyn ChatClient>,
    tools: Arc<ToolRegistry>,
    sessions: Arc<SessionStore>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator builder
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Model identifier of the underlying client
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Answer one question in the context of one session.
    ///
    /// The loop runs until the model replies with plain text or the round
    /// ceiling is reached. A model failure on the first round is fatal to
    /// the request; on later rounds the accumulated partial result is
    /// returned instead. Messages appended to the session are never rolled
    /// back.
    pub async fn ask(&self, question: &str, options: AskOptions) -> Result<AskOutcome> {
        let (session_id, session) = self
            .sessions
            .get_or_create(options.session_id.as_deref(), options.system_prompt.as_deref());

        session.lock().await.push_user(question);
        tracing::info!(session_id = %session_id, "Handling question");

        let temperature = options
            .temperature
            .unwrap_or(self.config.default_temperature);
        let max_tokens = options.max_tokens.unwrap_or(self.config.default_max_tokens);

        let tools = if options.enable_tools {
            let schemas = self.tools.schemas(options.tool_names.as_deref());
            (!schemas.is_empty()).then_some(schemas)
        } else {
            None
        };

        let mut usage = TokenUsage::default();
        let mut records: Vec<ToolCallRecord> = Vec::new();

        for round in 1..=self.config.max_rounds {
            let messages = session.lock().await.to_model_format();

            let reply = match self
                .client
                .chat(ChatRequest {
                    messages,
                    temperature,
                    max_tokens,
                    tools: tools.clone(),
                })
                .await
            {
                Ok(reply) => reply,
                Err(e) if round == 1 => {
                    tracing::error!(session_id = %session_id, error = %e, "Model call failed on first round");
                    return Err(AgentError::Model(e));
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        round,
                        error = %e,
                        "Model call failed mid-conversation, returning partial result"
                    );
                    return Ok(self
                        .degraded_outcome(&session, session_id, usage, records)
                        .await);
                }
            };

            usage.accumulate(&reply.usage);

            if reply.has_tool_calls() {
                tracing::debug!(
                    session_id = %session_id,
                    round,
                    calls = reply.tool_calls.len(),
                    "Model requested tools"
                );
                self.run_tool_round(&session, &reply.tool_calls, reply.content, &mut records)
                    .await;
                continue;
            }

            let answer = reply.content.unwrap_or_default();
            session.lock().await.push_assistant(&answer);
            tracing::info!(session_id = %session_id, round, "Final answer produced");

            return Ok(AskOutcome {
                answer,
                session_id,
                usage,
                tool_calls: records,
            });
        }

        tracing::warn!(
            session_id = %session_id,
            max_rounds = self.config.max_rounds,
            "Round ceiling reached without a final answer"
        );
        Ok(self
            .degraded_outcome(&session, session_id, usage, records)
            .await)
    }

    /// Execute every call of one round concurrently, then append the
    /// results in the order the model requested them.
    async fn run_tool_round(
        &self,
        session: &SharedSession,
        calls: &[ToolCallRequest],
        assistant_content: Option<String>,
        records: &mut Vec<ToolCallRecord>,
    ) {
        session
            .lock()
            .await
            .push(Message::assistant_tool_calls(
                assistant_content,
                calls.to_vec(),
            ));

        let results = future::join_all(calls.iter().map(|call| self.dispatch(call))).await;

        let mut session = session.lock().await;
        for (call, result) in calls.iter().zip(results) {
            session.push(Message::tool(&call.id, &call.name, result.to_string()));
            records.push(ToolCallRecord {
                tool_call_id: call.id.clone(),
                tool_name: call.name.clone(),
                arguments: call.arguments.clone(),
                result,
            });
        }
    }

    /// Execute one call; every failure becomes a structured error value
    /// fed back to the model, never a failed request.
    async fn dispatch(&self, call: &ToolCallRequest) -> Value {
        match self.tools.execute(&call.name, call.arguments.clone()).await {
            Ok(output) => output.payload(),
            Err(ToolError::NotFound(name)) => {
                tracing::warn!(tool = %name, "Model requested an unregistered tool");
                serde_json::json!({"error": format!("Tool '{}' not found", name)})
            }
        }
    }

    /// Best-available outcome when the loop cannot finish normally
    async fn degraded_outcome(
        &self,
        session: &SharedSession,
        session_id: String,
        usage: TokenUsage,
        records: Vec<ToolCallRecord>,
    ) -> AskOutcome {
        let answer = session
            .lock()
            .await
            .last_assistant_text()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        AskOutcome {
            answer,
            session_id,
            usage,
            tool_calls: records,
        }
    }
}

/// Builder for [`Orchestrator`]
pub struct OrchestratorBuilder {
    client: Option<Arc<dyn ChatClient>>,
    tools: Option<ToolRegistry>,
    sessions: Option<Arc<SessionStore>>,
    config: OrchestratorConfig,
}

impl OrchestratorBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            client: None,
            tools: None,
            sessions: None,
            config: OrchestratorConfig::default(),
        }
    }

    /// Set the chat client
    pub fn client<C: ChatClient + 'static>(mut self, client: C) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Set an already-shared chat client
    pub fn client_arc(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the tool registry
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the session store
    pub fn sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Set the orchestration configuration
    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the round ceiling
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.config.max_rounds = max_rounds;
        self
    }

    /// Build the orchestrator, validating its configuration
    pub fn build(self) -> Result<Orchestrator> {
        let client = self
            .client
            .ok_or_else(|| AgentError::config("chat client not set"))?;

        let sessions = self
            .sessions
            .ok_or_else(|| AgentError::config("session store not set"))?;

        let tools = self.tools.unwrap_or_default();

        if self.config.max_rounds == 0 {
            return Err(AgentError::config("max_rounds must be at least 1"));
        }

        if !(0.0..=2.0).contains(&self.config.default_temperature) {
            return Err(AgentError::config(
                "default_temperature must be within 0.0..=2.0",
            ));
        }

        if self.config.default_max_tokens == 0 {
            return Err(AgentError::config("default_max_tokens must be positive"));
        }

        Ok(Orchestrator {
            client,
            tools: Arc::new(tools),
            sessions,
            config: self.config,
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
