//! Vacation balance tool — simulates looking up remaining vacation days.

use crate::resolve_username;
use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};

// The stub backend always reports the same balance.
const VACATION_DAYS: u32 = 12;

pub struct VacationBalanceTool;

#[async_trait]
impl Tool for VacationBalanceTool {
    fn name(&self) -> &str {
        "vacation_balance"
    }

    fn description(&self) -> &str {
        "Look up how many vacation days a user has available."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The user whose balance to look up"
                }
            },
            "required": ["username"]
        })
    }

    fn identity_params(&self) -> &[&str] {
        &["username"]
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let username = resolve_username(&arguments)?;
        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: format!("User '{username}' has {VACATION_DAYS} vacation days available."),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_balance_for_user() {
        let tool = VacationBalanceTool;
        let result = tool
            .execute(serde_json::json!({"username": "maria"}))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("'maria'"));
        assert!(result.output.contains("12 vacation days"));
    }

    #[tokio::test]
    async fn enriched_args_resolve_user() {
        let tool = VacationBalanceTool;
        let result = tool
            .execute(serde_json::json!({"user": "Maria", "name": "Maria"}))
            .await
            .unwrap();
        assert!(result.output.contains("'Maria'"));
    }
}
