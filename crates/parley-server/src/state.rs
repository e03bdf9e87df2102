//! Shared application state

use anyhow::Result;
use parley_agent::{Orchestrator, OrchestratorConfig};
use parley_core::ServiceConfig;
use parley_llm::{ChatClient, OpenAiClient};
use parley_session::SessionStore;
use parley_tools::{builtin::default_registry, ToolRegistry};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub sessions: Arc<SessionStore>,
    pub tools: ToolRegistry,
    pub model: String,
}

impl AppState {
    /// Build the state from configuration, constructing the real client
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let mut client = OpenAiClient::new(&config.llm.api_key, &config.llm.model)?;
        if let Some(base_url) = &config.llm.base_url {
            client = client.with_base_url(base_url);
        }

        Self::with_client(Arc::new(client), config)
    }

    /// Build the state around an injected chat client
    pub fn with_client(client: Arc<dyn ChatClient>, config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let sessions = Arc::new(SessionStore::new(config.agent.max_conversation_history));
        let tools = default_registry();

        let orchestrator = Orchestrator::builder()
            .client_arc(client)
            .tools(tools.clone())
            .sessions(Arc::clone(&sessions))
            .config(OrchestratorConfig {
                max_rounds: config.agent.max_rounds,
                default_temperature: config.agent.default_temperature,
                default_max_tokens: config.agent.default_max_tokens,
            })
            .build()?;

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            sessions,
            tools,
            model: config.llm.model.clone(),
        })
    }
}
