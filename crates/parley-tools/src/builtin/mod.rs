//! Built-in tools

pub mod calculator;
pub mod transaction;
pub mod weather;

pub use calculator::CalculatorTool;
pub use transaction::TransactionStatusTool;
pub use weather::WeatherTool;

use crate::ToolRegistry;

/// Registry pre-populated with every built-in tool
pub fn default_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry.register(TransactionStatusTool);
    registry.register(WeatherTool);
    registry.register(CalculatorTool);
    registry
}
