//! List benefits tool — enumerates the benefits available to employees.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};

const BENEFITS: &[&str] = &[
    "Half days off",
    "Bereavement leave for immediate family",
    "Marriage leave",
    "Birthday day off",
    "Maternity/paternity leave",
    "Health insurance",
    "Performance bonuses",
];

pub struct ListBenefitsTool;

#[async_trait]
impl Tool for ListBenefitsTool {
    fn name(&self) -> &str {
        "list_benefits"
    }

    fn description(&self) -> &str {
        "List the benefits available to employees."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Optional filter text (currently unused)"
                }
            }
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: format!("Available benefits:\n- {}", BENEFITS.join("\n- ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_all_benefits() {
        let tool = ListBenefitsTool;
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("Health insurance"));
        assert!(result.output.contains("Performance bonuses"));
        assert_eq!(result.output.matches("\n- ").count(), BENEFITS.len());
    }

    #[test]
    fn takes_no_identity_params() {
        let tool = ListBenefitsTool;
        assert!(tool.identity_params().is_empty());
    }

    #[test]
    fn tool_definition() {
        let tool = ListBenefitsTool;
        let def = tool.to_definition();
        assert_eq!(def.name, "list_benefits");
    }
}
