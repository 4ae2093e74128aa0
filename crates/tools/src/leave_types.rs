//! Leave types tool — simulates listing the leave types a user may request.

use crate::resolve_username;
use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};

const LEAVE_TYPES: &[&str] = &[
    "Maternity/paternity leave",
    "Sick leave",
    "Marriage leave",
    "Bereavement leave for immediate family",
];

pub struct LeaveTypesTool;

#[async_trait]
impl Tool for LeaveTypesTool {
    fn name(&self) -> &str {
        "leave_types"
    }

    fn description(&self) -> &str {
        "List the leave types available to a user."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The user to list leave types for"
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
            output: format!(
                "Leave types available for '{username}':\n- {}",
                LEAVE_TYPES.join("\n- ")
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_leave_types_for_user() {
        let tool = LeaveTypesTool;
        let result = tool
            .execute(serde_json::json!({"username": "ana"}))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("'ana'"));
        assert!(result.output.contains("Sick leave"));
    }

    #[tokio::test]
    async fn missing_user_is_invalid() {
        let tool = LeaveTypesTool;
        assert!(tool.execute(serde_json::json!({})).await.is_err());
    }
}
