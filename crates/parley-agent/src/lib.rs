//! Agent Orchestration
//!
//! The control loop that answers one question in the context of one
//! session: it queries the model, executes requested tools, feeds results
//! back, and terminates with a final answer within a bounded number of
//! rounds.
//!
//! # Example
//!
//! ```no_run
//! use parley_agent::{AskOptions, Orchestrator};
//! use parley_llm::OpenAiClient;
//! use parley_session::SessionStore;
//! use parley_tools::builtin::default_registry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new("api-key", "gpt-4-turbo-preview")?;
//!
//!     let orchestrator = Orchestrator::builder()
//!         .client(client)
//!         .tools(default_registry())
//!         .sessions(Arc::new(SessionStore::new(10)))
//!         .build()?;
//!
//!     let outcome = orchestrator
//!         .ask("What is 15 + 27?", AskOptions::default())
//!         .await?;
//!     println!("{}", outcome.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod orchestrator;

// Re-exports
pub use error::{AgentError, Result};
pub use orchestrator::{
    AskOptions, AskOutcome, Orchestrator, OrchestratorBuilder, OrchestratorConfig, ToolCallRecord,
};
