//! Tool Calling Demo
//!
//! Asks a question the model can only answer by calling the built-in tools.
//!
//! Run with:
//! ```bash
//! PARLEY__LLM__API_KEY=your-key cargo run -p parley-agent --example tool_calling_demo
//! ```

use parley_agent::{AskOptions, Orchestrator};
use parley_llm::OpenAiClient;
use parley_session::SessionStore;
use parley_tools::builtin::default_registry;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("PARLEY__LLM__API_KEY")
        .expect("PARLEY__LLM__API_KEY must be set to run this demo");

    let orchestrator = Orchestrator::builder()
        .client(OpenAiClient::new(api_key, "gpt-4-turbo-preview")?)
        .tools(default_registry())
        .sessions(Arc::new(SessionStore::new(10)))
        .build()?;

    println!("=== Round 1: tool-backed question ===");
    let outcome = orchestrator
        .ask(
            "What's the weather in Tokyo, and what is 18 * 24?",
            AskOptions::default(),
        )
        .await?;

    println!("Answer: {}", outcome.answer);
    println!("Tokens used: {}", outcome.usage.total_tokens);
    for record in &outcome.tool_calls {
        println!("  tool {} -> {}", record.tool_name, record.result);
    }

    println!("\n=== Round 2: follow-up in the same session ===");
    let follow_up = orchestrator
        .ask(
            "And in fahrenheit?",
            AskOptions {
                session_id: Some(outcome.session_id),
                ..Default::default()
            },
        )
        .await?;

    println!("Answer: {}", follow_up.answer);

    Ok(())
}
