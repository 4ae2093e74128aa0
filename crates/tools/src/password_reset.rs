//! Password reset tool — simulates resetting a user's password.

use crate::resolve_username;
use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use tracing::info;

pub struct ResetPasswordTool;

#[async_trait]
impl Tool for ResetPasswordTool {
    fn name(&self) -> &str {
        "reset_password"
    }

    fn description(&self) -> &str {
        "Reset a user's password. The user receives an email with instructions to set a new one."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The user whose password should be reset"
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
        info!(username, "Password reset requested");
        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: format!(
                "The password for user '{username}' has been reset successfully. \
                 They will receive an email with instructions to set a new password."
            ),
        })
    }
}
