//! Chat Client Abstraction
//!
//! A unified interface for chat-completion providers, plus the
//! OpenAI-compatible HTTP implementation the service ships with.
//!
//! # Example
//!
//! ```no_run
//! use parley_llm::{ChatClient, ChatRequest, ChatMessage, OpenAiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new("your-api-key", "gpt-4-turbo-preview")?;
//!
//!     let request = ChatRequest {
//!         messages: vec![ChatMessage::text("user", "Hello, how are you?")],
//!         temperature: 0.7,
//!         max_tokens: 1000,
//!         tools: None,
//!     };
//!
//!     let reply = client.chat(request).await?;
//!     println!("{}", reply.content.unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod openai;
pub mod types;

// Re-exports
pub use client::{ChatClient, ChatReply, ChatRequest};
pub use error::{LlmError, Result};
pub use openai::OpenAiClient;
pub use types::{
    ChatMessage, FunctionPayload, MessageRole, TokenUsage, ToolCallPayload, ToolCallRequest,
};
