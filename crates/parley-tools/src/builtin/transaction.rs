//! Transaction status lookup tool
//!
//! Serves a canned transaction table; a stand-in for a payments backend.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{schema::property, Tool, ToolOutput, ToolSchema};

/// Looks up the status of a transaction by id
pub struct TransactionStatusTool;

#[derive(Debug, Deserialize)]
struct TransactionArgs {
    transaction_id: String,
}

fn lookup(transaction_id: &str) -> Option<(&'static str, f64, &'static str)> {
    match transaction_id {
        "TXN-001" => Some(("completed", 150.00, "2024-01-15")),
        "TXN-002" => Some(("pending", 250.50, "2024-01-16")),
        "TXN-003" => Some(("failed", 75.25, "2024-01-14")),
        _ => None,
    }
}

#[async_trait]
impl Tool for TransactionStatusTool {
    fn name(&self) -> &str {
        "check_transaction_status"
    }

    fn description(&self) -> &str {
        "Check the status of a transaction by its ID"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new()
            .with_properties(serde_json::json!({
                "transaction_id": property("string", "The unique transaction ID to check"),
            }))
            .with_required(vec!["transaction_id".to_string()])
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: TransactionArgs = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(e) => return ToolOutput::error(format!("Invalid arguments: {}", e)),
        };

        match lookup(&args.transaction_id) {
            Some((status, amount, date)) => ToolOutput::success(serde_json::json!({
                "transaction_id": args.transaction_id,
                "status": status,
                "amount": amount,
                "date": date,
            })),
            // An unknown id is an answer, not a fault
            None => ToolOutput::success(serde_json::json!({
                "transaction_id": args.transaction_id,
                "status": "not_found",
                "message": format!("Transaction {} not found", args.transaction_id),
            })),
        }
    }
}
