//! Arithmetic tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{schema::enum_property, schema::property, Tool, ToolOutput, ToolSchema};

/// Performs basic arithmetic over two operands
pub struct CalculatorTool;

#[derive(Debug, Deserialize)]
struct CalculatorArgs {
    operation: String,
    a: f64,
    b: f64,
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Perform mathematical calculations (add, subtract, multiply, divide)"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new()
            .with_properties(serde_json::json!({
                "operation": enum_property(
                    "string",
                    "The operation to perform",
                    &["add", "subtract", "multiply", "divide"],
                ),
                "a": property("number", "The first operand"),
                "b": property("number", "The second operand"),
            }))
            .with_required(vec![
                "operation".to_string(),
                "a".to_string(),
                "b".to_string(),
            ])
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: CalculatorArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(e) => return ToolOutput::error(format!("Invalid arguments: {}", e)),
        };

        let result = match args.operation.as_str() {
            "add" => args.a + args.b,
            "subtract" => args.a - args.b,
            "multiply" => args.a * args.b,
            "divide" => {
                if args.b == 0.0 {
                    return ToolOutput::error("Division by zero");
                }
                args.a / args.b
            }
            op => {
                return ToolOutput::error(format!("Unknown operation: {}", op));
            }
        };

        ToolOutput::success(serde_json::json!({
            "operation": args.operation,
            "a": args.a,
            "b": args.b,
            "result": result,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add() {
        let output = CalculatorTool
            .execute(serde_json::json!({"operation": "add", "a": 5.0, "b": 3.0}))
            .await;

        assert!(output.success);
        assert_eq!(output.payload()["result"], 8.0);
    }

    #[tokio::test]
    async fn test_divide_by_zero() {
        let output = CalculatorTool
            .execute(serde_json::json!({"operation": "divide", "a": 10.0, "b": 0.0}))
            .await;

        assert!(!output.success);
        assert_eq!(output.payload()["error"], "Division by zero");
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let output = CalculatorTool
            .execute(serde_json::json!({"operation": "modulo", "a": 10.0, "b": 3.0}))
            .await;

        assert!(!output.success);
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let output = CalculatorTool.execute(serde_json::json!({})).await;

        assert!(!output.success);
        assert!(output.error.unwrap().contains("Invalid arguments"));
    }

    #[test]
    fn test_schema_shape() {
        let schema = CalculatorTool.schema();
        assert_eq!(schema.schema_type, "object");
        assert_eq!(schema.required.as_ref().unwrap().len(), 3);
    }
}
