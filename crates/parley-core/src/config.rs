//! Configuration for the parley service
//!
//! Settings are layered from defaults, an optional configuration file, and
//! `PARLEY__`-prefixed environment variables (e.g. `PARLEY__LLM__API_KEY`,
//! `PARLEY__AGENT__MAX_ROUNDS`).

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest usable conversation history bound: one tool round needs a user
/// message, an assistant tool-call message, at least one tool result, and
/// the final assistant message.
pub const MIN_CONVERSATION_HISTORY: usize = 4;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Language model provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Orchestration settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Language model provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// API key for the provider (empty until configured)
    #[serde(default)]
    pub api_key: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the provider endpoint (e.g. a compatible proxy)
    #[serde(default)]
    pub base_url: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Upper bound on messages kept per session
    #[serde(default = "default_max_history")]
    pub max_conversation_history: usize,

    /// Sampling temperature used when a request does not override it
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Completion token cap used when a request does not override it
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Ceiling on model/tool rounds within one ask
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON-formatted log lines
    #[serde(default)]
    pub json: bool,
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_history() -> usize {
    10
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_max_rounds() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: None,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_conversation_history: default_max_history(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            max_rounds: default_max_rounds(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            server: ServerSettings::default(),
            agent: AgentSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("PARLEY").separator("__"))
            .build()?;

        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, layered with environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CoreError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("PARLEY").separator("__"))
            .build()?;

        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::info!("Configuration loaded from {}", path.display());

        Ok(config)
    }

    /// Validate bounds that would otherwise surface mid-conversation.
    ///
    /// A history bound below [`MIN_CONVERSATION_HISTORY`] cannot hold the
    /// messages of a single tool round and is rejected here rather than
    /// producing undefined trimming behavior at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.agent.max_conversation_history < MIN_CONVERSATION_HISTORY {
            return Err(CoreError::config(format!(
                "max_conversation_history must be at least {} (got {})",
                MIN_CONVERSATION_HISTORY, self.agent.max_conversation_history
            )));
        }

        if self.agent.max_rounds == 0 {
            return Err(CoreError::config("max_rounds must be at least 1"));
        }

        if !(0.0..=2.0).contains(&self.agent.default_temperature) {
            return Err(CoreError::config(format!(
                "default_temperature must be within 0.0..=2.0 (got {})",
                self.agent.default_temperature
            )));
        }

        if self.agent.default_max_tokens == 0 {
            return Err(CoreError::config("default_max_tokens must be positive"));
        }

        Ok(())
    }
}
