//! Tool Calling System
//!
//! Infrastructure for tools the model can request during a conversation:
//! the [`Tool`] trait, the order-preserving [`ToolRegistry`], and the
//! built-in tools the service registers at startup.
//!
//! # Example
//!
//! ```
//! use parley_tools::{builtin::CalculatorTool, ToolRegistry};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ToolRegistry::new();
//!     registry.register(CalculatorTool);
//!
//!     let output = registry
//!         .execute("calculate", json!({"operation": "add", "a": 5.0, "b": 3.0}))
//!         .await
//!         .unwrap();
//!     assert!(output.success);
//! }
//! ```

pub mod builtin;
pub mod error;
pub mod registry;
pub mod schema;
pub mod tool;

// Re-exports
pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use schema::ToolSchema;
pub use tool::{Tool, ToolOutput};
