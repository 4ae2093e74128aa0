//! User provisioning tool — simulates creating an account in the IT system.

use crate::resolve_username;
use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use tracing::info;

pub struct ProvisionUserTool;

#[async_trait]
impl Tool for ProvisionUserTool {
    fn name(&self) -> &str {
        "provision_user"
    }

    fn description(&self) -> &str {
        "Provision a user account in the IT system. The user receives an email with access credentials."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The user to provision"
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
        info!(username, "User provisioning requested");
        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: format!(
                "User '{username}' has been provisioned in the IT system. \
                 They will receive an email with their access credentials."
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn provisions_named_user() {
        let tool = ProvisionUserTool;
        let result = tool
            .execute(serde_json::json!({"username": "newhire"}))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("'newhire'"));
        assert!(result.output.contains("provisioned"));
    }

    #[tokio::test]
    async fn missing_user_is_invalid() {
        let tool = ProvisionUserTool;
        assert!(tool.execute(serde_json::json!({})).await.is_err());
    }
}
